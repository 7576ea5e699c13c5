//! # modcss
//!
//! Parses a CSS module, scopes its class names, ids and keyframes names to
//! the file, and prints the result along with the export record.
//!
//! ```rust
//! use modcss::ScopeOptions;
//!
//! let processed = modcss::process(
//!     ".foo { animation: rotate 1.4s linear infinite; } @keyframes rotate {}",
//!     Some("src/app.css"),
//!     &ScopeOptions::default(),
//! )
//! .unwrap();
//!
//! assert!(processed.css.contains(".foo_WjnDF4"));
//! assert_eq!(processed.exports().unwrap().local("rotate"), Some("rotate_WjnDF4"));
//! ```

pub mod error;

pub use css_scope::{
    Composition, GenerateScopedName, LocalEntry, LongScopedName, Message, NamingStrategy,
    ScopeConfig, ScopeError, ScopeOptions, ScopeTransform, ShortScopedName,
};
pub use cssom::{CssError, StyleSheet, parse_stylesheet};
pub use error::{ModcssError, Result};

/// Output of [`process`].
#[derive(Clone, Debug, PartialEq)]
pub struct Processed {
    pub css: String,
    pub messages: Vec<Message>,
}

impl Processed {
    /// The export record of the run.
    pub fn exports(&self) -> Option<&Message> {
        self.messages
            .iter()
            .find(|message| matches!(message, Message::ExportLocals { .. }))
    }
}

/// Parses `source`, scopes it and prints it back.
pub fn process(source: &str, file_path: Option<&str>, options: &ScopeOptions) -> Result<Processed> {
    let mut sheet = parse_stylesheet(source)?;
    let mut messages = Vec::new();
    ScopeTransform::new(options.clone()).run(&mut sheet, file_path, &mut messages)?;

    log::info!(
        "processed {} ({} nodes)",
        file_path.unwrap_or("<anonymous>"),
        sheet.nodes.len()
    );
    Ok(Processed {
        css: sheet.to_css(),
        messages,
    })
}
