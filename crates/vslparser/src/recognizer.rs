//! Распознаватель грамматики записи.
//!
//! # Грамматика
//!
//! ```text
//! *   << Request  >> 32770
//! -   ReqMethod      GET
//! -   ReqURL         /
//! -   End
//! ```
//!
//! Пустые строки перед заголовком разделяют записи и пропускаются.
//! Заголовок — это `*`, `<<`, тип, `>>` и десятичный VXID; между токенами
//! допустимы любые пробелы и табуляции. Каждая строка тела начинается с
//! маркера `-` в первой колонке, `- End` закрывает запись.

use tracing::{debug, trace};

use crate::{
    entry::{Entry, EntryKind, Fields, Vxid},
    error::{ParseError, ParseResult},
    source::LineSource,
    tokenizer::{is_blank, split_line},
};

const HEADER_MARKER: char = '*';
const KIND_OPEN: &str = "<<";
const KIND_CLOSE: &str = ">>";
const BODY_MARKER: char = '-';
const END_KEYWORD: &str = "End";

/// Читает ровно одну запись из `source`.
///
/// Потребляет ведущие пустые строки, заголовок, тело и строку `- End`,
/// но ничего после неё. Повторный вызов с тем же источником возвращает
/// следующую запись.
///
/// # Ошибки
///
/// - [`ParseError::EndOfInput`] — поток исчерпан до заголовка
/// - [`ParseError::MalformedHeader`] — первая непустая строка не заголовок
/// - [`ParseError::MalformedBody`] — у строки тела нет маркера или тега
/// - [`ParseError::TruncatedEntry`] — поток закончился до `- End`
/// - [`ParseError::Io`] — источник не смог выдать строку
///
/// # Пример
///
/// ```
/// use vslparser::{EntryKind, lines_of, parse};
///
/// let mut source = lines_of("* << BeReq >> 123\n- End\n\n* << BeReq >> 124\n- End");
///
/// assert_eq!(parse(&mut source).unwrap().vxid(), 123);
/// assert_eq!(parse(&mut source).unwrap().vxid(), 124);
/// assert!(parse(&mut source).unwrap_err().is_end_of_input());
/// ```
pub fn parse<S: LineSource + ?Sized>(source: &mut S) -> ParseResult<Entry> {
    let header = loop {
        match source.next_line()? {
            None => return Err(ParseError::EndOfInput),
            Some(line) if line.trim_start_matches(is_blank).is_empty() => {
                trace!("skipping separator line");
            }
            Some(line) => break line,
        }
    };

    let (kind, vxid) = parse_header(&header)?;
    trace!(%kind, vxid, "entry header");

    let mut fields = Fields::new();
    loop {
        let Some(line) = source.next_line()? else {
            return Err(ParseError::TruncatedEntry { kind, vxid });
        };
        match parse_body_line(&line)? {
            BodyLine::End => break,
            BodyLine::Field(tag, value) => fields.push(tag, value),
        }
    }

    debug!(%kind, vxid, tags = fields.len(), "entry parsed");
    Ok(Entry::new(kind, vxid, fields))
}

/// Разбирает `* << KIND >> VXID`.
fn parse_header(line: &str) -> ParseResult<(EntryKind, Vxid)> {
    let rest = line.trim_matches(is_blank);
    let rest = rest
        .strip_prefix(HEADER_MARKER)
        .ok_or_else(|| ParseError::malformed_header(line, "expected '*' marker"))?;
    let rest = rest
        .trim_start_matches(is_blank)
        .strip_prefix(KIND_OPEN)
        .ok_or_else(|| ParseError::malformed_header(line, "expected '<<' before kind"))?;
    let (kind, id) = rest
        .split_once(KIND_CLOSE)
        .ok_or_else(|| ParseError::malformed_header(line, "expected '>>' after kind"))?;

    let kind = kind.trim_matches(is_blank);
    let kind = kind.parse::<EntryKind>().map_err(|e| ParseError::malformed_header(line, e.to_string()))?;

    let id = id.trim_start_matches(is_blank);
    let vxid = parse_vxid(id).ok_or_else(|| {
        ParseError::malformed_header(line, format!("invalid transaction id '{id}'"))
    })?;

    Ok((kind, vxid))
}

/// Только цифры: `u64::from_str` сам по себе принимает и ведущий `+`.
fn parse_vxid(s: &str) -> Option<Vxid> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[derive(Debug, PartialEq, Eq)]
enum BodyLine<'a> {
    End,
    Field(&'a str, &'a str),
}

fn parse_body_line(line: &str) -> ParseResult<BodyLine<'_>> {
    let Some(text) = line.strip_prefix(BODY_MARKER) else {
        return Err(ParseError::malformed_body(line, "expected '-' marker in the first column"));
    };
    if text.trim_start_matches(is_blank) == END_KEYWORD {
        return Ok(BodyLine::End);
    }

    let (tag, value) = split_line(text);
    if tag.is_empty() {
        return Err(ParseError::malformed_body(line, "missing tag"));
    }
    Ok(BodyLine::Field(tag, value))
}
