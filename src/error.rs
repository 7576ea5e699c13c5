use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModcssError {
    #[error("CSS parse error: {0}")]
    Css(#[from] cssom::CssError),

    #[error("Scoping error: {0}")]
    Scope(#[from] css_scope::ScopeError),
}

pub type Result<T> = std::result::Result<T, ModcssError>;
