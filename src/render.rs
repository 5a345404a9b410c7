pub(crate) mod export;
pub(crate) mod fonts;
pub(crate) mod pdf;
pub(crate) mod png;
pub(crate) mod renderer;
pub(crate) mod svg;
pub(crate) mod text;
