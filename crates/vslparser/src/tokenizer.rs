//! Токенизатор строк тела записи.
//!
//! Строка тела (уже без маркера `-`) делится на тег и значение.
//! Разделителем служат только ведущие пробелы: хвостовые пробелы
//! принадлежат значению и сохраняются как есть.

/// Пробельные символы, разделяющие структурные токены.
pub(crate) fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Делит строку тела на `(тег, значение)`.
///
/// Ведущие пробелы и табуляции пропускаются, тег — следующая за ними
/// последовательность непробельных символов, значение — остаток строки
/// без ведущих пробелов. Ошибок не бывает: пустая строка даёт две пустые.
///
/// # Примеры
///
/// ```
/// use vslparser::split_line;
///
/// assert_eq!(split_line("  ReqHeader   Host: example.com  "), ("ReqHeader", "Host: example.com  "));
/// assert_eq!(split_line("End"), ("End", ""));
/// assert_eq!(split_line(" \t "), ("", ""));
/// ```
#[must_use]
pub fn split_line(line: &str) -> (&str, &str) {
    let line = line.trim_start_matches(is_blank);
    match line.find(is_blank) {
        Some(idx) => (&line[..idx], line[idx..].trim_start_matches(is_blank)),
        None => (line, ""),
    }
}
