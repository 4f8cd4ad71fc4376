//! # Weft
//! Weft is a two-way data binding engine: it links the properties of plain
//! dynamic [`Object`]s to elements of a headless document tree
//! ([`weft_dom`]) so that a change on either side propagates to the other,
//! with no diffing engine in between: every property knows exactly which
//! attributes mirror it.
//!
//! ## Example: programmatic binding
//! ```rust
//! use weft::{Binder, Binding, Object};
//! use weft_dom::Document;
//!
//! let doc = Document::new();
//! let field = doc.create_element("input");
//! doc.root().append(&field);
//!
//! let binder = Binder::with_document(doc);
//! let person = Object::new().with("firstName", "Ada");
//! binder.bind(&person, "firstName", vec![Binding::new(&field, ["value"])]);
//!
//! // the bound view reflects existing state immediately
//! assert_eq!(field.value(), "Ada");
//!
//! // writes propagate to every bound attribute
//! person.set("firstName", "Grace");
//! assert_eq!(field.value(), "Grace");
//! ```
//!
//! Reverse propagation comes for free on live input sources: text inputs,
//! text areas, checkboxes, and editable regions push `input`/`change`
//! events back through the same write path, so the model, every other
//! bound view, and every watcher stay in sync.
//!
//! ## Example: markup declarations
//! Markup can declare bindings itself, addressing objects by the labels
//! registered with [`Binder::model`]:
//!
//! ```rust
//! use weft::{Binder, Object};
//! use weft_dom::Document;
//!
//! let doc = Document::new();
//! let label = doc.create_element("div");
//! label.set_attr("data-bind", "person.firstName");
//! doc.root().append(&label);
//!
//! let binder = Binder::with_document(doc);
//! binder.model([("person", Object::new().with("firstName", "Ada"))]);
//!
//! // scans are deferred past the current synchronous phase
//! assert_eq!(label.text(), "");
//! binder.drain_pending_work().unwrap();
//! assert_eq!(label.text(), "Ada");
//! ```
//!
//! Two declaration styles are recognized: `data-bind-to` lists target
//! attributes per property (`data-bind-to="value,title:person.firstName"`),
//! and `data-bind` binds content, either directly
//! (`data-bind="person.firstName"`) or, with an empty value, by scanning
//! the subtree for `{ person.firstName }` placeholders.
//!
//! ## Observation without views
//! [`Binder::watch`] registers a `(new, old)` callback with no view
//! wiring, and a binder built with [`Binder::new`] needs no document at
//! all, which suits headless object-graph observation.
//!
//! ## Scope and lifetime
//! All state (the model store, the label table, the deferred scan queue)
//! is owned by the [`Binder`] you construct; nothing is process-global
//! except the object identifier counter. Model entries are never removed
//! (there is no unbind), but they live only as long as their binder.

pub use weft_dom as dom;

mod binder;
mod id;
mod labels;
mod object;
mod path;
mod scan;
mod source;
mod store;
mod value;
mod view;

pub use binder::{Binder, Watcher};
pub use dom::{Document, Element, ElementEvent, Node};
pub use id::ObjId;
pub use object::Object;
pub use scan::{DirectiveError, Directives};
pub use store::Binding;
pub use value::Value;
