//! # Mirrormere
//!
//! A runtime value inspection and interactive editing engine.
//!
//! Mirrormere tracks live values behind inspected slots: it classifies
//! each value into a closed display category, derives labels and render
//! states for an externally-owned display surface, and routes user edits
//! back through parsing, coercion, and an owning store. Nested records
//! over value-type container copies cascade their edits upward so a
//! change to a copied field always reaches the original storage.
//!
//! ## Architecture
//!
//! - **Value model**: a dynamic [`Value`](value::Value) union covering
//!   primitives, strings, enums, structs, colors, containers, and
//!   liveness-tracked object references
//! - **Collaborator seams**: [`Reflection`](reflect::Reflection) for type
//!   shape questions, [`Codec`](codec::Codec) for the text round-trip,
//!   [`Store`](store::Store) for authoritative writes, and
//!   [`DisplaySlot`](slot::DisplaySlot) for rendering
//! - **Records**: per-slot state machines owning classification, labels,
//!   and a pooled editor
//! - **Session**: the generational record arena and every engine
//!   operation
//!
//! ## Example
//!
//! ```
//! use mirrormere::{
//!     Category, MemoryStore, RecordSpec, Reflection, Session, Value,
//!     registry::{Shape, TypeRegistry},
//!     record::{Member, Origin},
//! };
//!
//! let mut reg = TypeRegistry::new();
//! let player_ty = reg.register_object("Player", Shape::default());
//!
//! let mut store = MemoryStore::new();
//! let player = store.spawn(player_ty, "player_one");
//! store.set_field(&player, "health", Value::I32(100));
//!
//! let mut session = Session::new();
//! let health = session.create(
//!     RecordSpec::new("health", reg.lookup("i32").unwrap()).with_origin(Origin::Store {
//!         target: player.clone(),
//!         member: Member::Field("health".into()),
//!     }),
//!     &reg,
//! );
//!
//! // Evaluation classifies; an edit parses, coerces, and writes through.
//! session.evaluate(health, Ok(store.field(&player, "health")), &reg);
//! assert_eq!(session.record(health).unwrap().category(), Category::Number);
//!
//! session.request_edit(health, "42", &reg, &mut store);
//! assert_eq!(store.field(&player, "health"), Some(Value::I32(42)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod category;
pub mod codec;
pub mod editor;
pub mod error;
pub mod pool;
pub mod record;
pub mod reflect;
pub mod registry;
pub mod session;
pub mod slot;
pub mod store;
pub mod value;

// Re-export main types
pub use args::{example_placeholder, parse_arguments, ParamSpec};
pub use category::{classify, Category};
pub use codec::{Codec, ParseError};
pub use editor::{Editor, EditorKind, EditorState};
pub use error::{AccessError, ApplyResult, EvalFailure};
pub use pool::EditorPool;
pub use record::{read_member, write_member, Member, Origin, Record, RecordSpec};
pub use reflect::{Reflection, Runtime, TypeId};
pub use registry::TypeRegistry;
pub use session::{RecordId, Session, SessionOptions};
pub use slot::{DisplaySlot, Label, Rendering, Tone};
pub use store::{MemoryStore, Store};
pub use value::{Color, EnumValue, MapKey, ObjectRef, StructValue, Value};

/// Mirrormere version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
