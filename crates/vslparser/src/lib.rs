//! Потоковый парсер вывода `varnishlog`.
//!
//! Вывод `varnishlog` состоит из записей (entries). Каждая запись описывает
//! одну транзакцию и имеет вид:
//!
//! ```text
//! *   << Request  >> 32770
//! -   Begin          req 32769 rxreq
//! -   ReqMethod      GET
//! -   ReqURL         /
//! -   End
//! ```
//!
//! Записи разделяются пустыми строками. Парсер читает ровно одну запись за
//! вызов и не интерпретирует значения тегов — это задача вызывающего кода.
//!
//! # Быстрый старт
//!
//! ```
//! use vslparser::prelude::*;
//!
//! let mut source = lines_of("* << BeReq >> 123\n- BereqMethod GET\n- End");
//! let entry = parse(&mut source).unwrap();
//!
//! assert_eq!(entry.kind(), EntryKind::BeReq);
//! assert_eq!(entry.vxid(), 123);
//! assert_eq!(entry.first("BereqMethod"), Some("GET"));
//! assert!(parse(&mut source).unwrap_err().is_end_of_input());
//! ```

pub mod entry;
pub mod error;
pub mod reader;
pub mod recognizer;
pub mod source;
pub mod tokenizer;

pub use entry::{Entry, EntryKind, Fields, Vxid};
pub use error::{ParseError, ParseResult};
pub use reader::EntryReader;
pub use recognizer::parse;
pub use source::{IterLines, LineSource, lines_of};
pub use tokenizer::split_line;

/// Часто используемые типы одним импортом.
pub mod prelude {
    pub use crate::{
        entry::{Entry, EntryKind, Fields, Vxid},
        error::{ParseError, ParseResult},
        reader::EntryReader,
        recognizer::parse,
        source::{IterLines, LineSource, lines_of},
    };
}
