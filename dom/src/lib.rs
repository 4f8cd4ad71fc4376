//! A headless document tree.
//!
//! This crate is the substrate [`weft`](https://docs.rs/weft) binds against:
//! a small in-memory rendition of the parts of a browser document a binding
//! engine touches. Elements carry a tag, insertion-ordered attributes, a
//! `data-*` dataset sub-interface, mixed text/element children, and `input`/
//! `change` listeners.
//!
//! The tree is built programmatically:
//!
//! ```rust
//! use weft_dom::Document;
//!
//! let doc = Document::new();
//! let name = doc.create_element("input");
//! name.set_value("Ada");
//! doc.root().append(&name);
//! assert_eq!(doc.root().markup(), r#"<body><input value="Ada"></input></body>"#);
//! ```
//!
//! All state lives in a central arena behind the [`Document`] handle;
//! [`Element`] handles address into it and stay valid for the life of the
//! document. Nothing here is thread-safe: like the rest of weft, a document
//! belongs to the thread that created it.

pub mod dataset;
mod document;
mod element;
mod event;

pub use document::{Document, NodeId};
pub use element::{Element, Node};
pub use event::ElementEvent;
