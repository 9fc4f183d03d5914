pub mod list_field;
pub mod pdf_link;
pub mod validation;

pub use list_field::{ListInput, decode_list, encode_list, split_list};
pub use pdf_link::{PdfLinkError, clean_pdf_link, normalize_pdf_link, validate_pdf_link};
