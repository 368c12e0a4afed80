//! Потоковый reader для записей.
//!
//! Предоставляет [`EntryReader`] — итератор поверх [`parse`], который
//! читает записи из любого [`LineSource`] до чистого конца потока.

use std::{
    io::{self, BufRead, BufReader, Read},
    iter::FusedIterator,
};

use crate::{
    entry::Entry,
    error::{ParseError, ParseResult},
    recognizer::parse,
    source::LineSource,
};

/// Потоковый reader для записей.
///
/// Каждый вызов [`Iterator::next`] — это один вызов [`parse`].
/// [`ParseError::EndOfInput`] завершает итерацию, любая другая ошибка
/// возвращается один раз, после чего итератор останавливается.
///
/// # Пример
///
/// ```
/// use vslparser::{EntryReader, lines_of};
///
/// let reader = EntryReader::new(lines_of("* << BeReq >> 1\n- End\n\n* << BeReq >> 2\n- End\n"));
/// let ids: Vec<u64> = reader.map(|e| e.unwrap().vxid()).collect();
///
/// assert_eq!(ids, [1, 2]);
/// ```
#[derive(Debug)]
pub struct EntryReader<S> {
    source: S,
    /// Счётчик прочитанных записей.
    entries_read: usize,
    /// Флаг достижения конца потока или ошибки.
    finished: bool,
}

impl<S: LineSource> EntryReader<S> {
    /// Создаёт reader поверх источника строк.
    pub fn new(source: S) -> Self {
        Self { source, entries_read: 0, finished: false }
    }

    /// Возвращает количество успешно прочитанных записей.
    #[must_use]
    pub fn entries_read(&self) -> usize {
        self.entries_read
    }

    /// Получает ссылку на источник строк.
    #[must_use]
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Извлекает источник строк.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<R: Read> EntryReader<io::Lines<BufReader<R>>> {
    /// Создаёт reader поверх любого [`Read`].
    ///
    /// Входной reader оборачивается в [`BufReader`].
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReader::new(reader).lines())
    }
}

impl<S: LineSource> Iterator for EntryReader<S> {
    type Item = ParseResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match parse(&mut self.source) {
            Ok(entry) => {
                self.entries_read += 1;
                Some(Ok(entry))
            }
            Err(ParseError::EndOfInput) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true; // Остановка при ошибке
                Some(Err(e))
            }
        }
    }
}

impl<S: LineSource> FusedIterator for EntryReader<S> {}
