//! Модель данных записи `varnishlog`.
//!
//! Запись ([`Entry`]) состоит из типа транзакции ([`EntryKind`]),
//! её идентификатора ([`Vxid`]) и многозначного отображения тегов ([`Fields`]).

mod fields;
mod types;

pub use fields::Fields;
pub use types::{Entry, EntryKind, Vxid};
