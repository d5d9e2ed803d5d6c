use std::io;

/// Errors produced while computing or rendering an invoice.
///
/// Every variant is terminal for the current render call: no bytes
/// are returned once one of these surfaces.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    /// Header or line-item data is missing or out of range.
    #[error("invalid invoice input: {0}")]
    InvalidInvoiceInput(String),

    /// The item table would extend below the lowest usable line of
    /// the page. Rendering it would require pagination.
    #[error(
        "table does not fit on the page: bottom edge at {table_bottom}pt, floor at {floor}pt"
    )]
    LayoutOverflow { table_bottom: f64, floor: f64 },

    /// A draw call was issued after the surface was finished.
    #[error("document already finalized")]
    DocumentAlreadyFinalized,

    /// The page layout configuration is unusable.
    #[error("invalid page layout: {0}")]
    InvalidLayout(String),

    /// Logo bytes could not be decoded.
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, InvoiceError>;

impl InvoiceError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        InvoiceError::InvalidInvoiceInput(msg.into())
    }
}
