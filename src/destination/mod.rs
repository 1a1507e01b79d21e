//! Destination subpaths
//!
//! A destination is the compact `#key=value&...` token appended to a file
//! reference in a link, and the structured [`DestinationRecord`] it decodes to.
//!
//! # Example token
//!
//! ```text
//! #page=5&annotation=27R&offset=100,200,&rect=72,688,300,700
//!  │      │              │               └── left,bottom,right,top
//!  │      │              └────────────────── left,top,zoom (any may be empty)
//!  │      └───────────────────────────────── annotation id
//!  └──────────────────────────────────────── page (1-indexed, mandatory)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pdf_anchor::destination::{decode, encode, DestinationRecord};
//!
//! let record = decode("#page=5&offset=100,200,1.5")?;
//! assert_eq!(record.page, 5);
//!
//! let token = encode(&DestinationRecord::page(3).with_annotation("12R"));
//! assert_eq!(token, "#page=3&annotation=12R");
//! ```

mod codec;
mod types;

pub use codec::{decode, decode_with_default_page, encode, ParseError};
pub use types::DestinationRecord;
