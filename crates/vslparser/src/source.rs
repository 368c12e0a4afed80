//! Источники строк для распознавателя записей.
//!
//! Распознавателю нужна лишь «следующая строка или конец потока».
//! [`LineSource`] реализован для буферизованных reader'ов через
//! [`std::io::Lines`], для текста в памяти через [`lines_of`] и для
//! произвольных итераторов строк через [`IterLines`].

use std::io::{self, BufRead};

/// Поставщик строк текста без символов перевода строки.
///
/// Позиция чтения принадлежит источнику: повторные вызовы
/// [`parse`](crate::parse) с тем же источником продолжают с места,
/// где остановился предыдущий.
pub trait LineSource {
    /// Возвращает следующую строку или `Ok(None)`, если поток исчерпан.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<B: BufRead> LineSource for io::Lines<B> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.next().transpose()
    }
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_line()
    }
}

/// Адаптер итератора строк к [`LineSource`].
///
/// Чтение из него никогда не завершается ошибкой.
#[derive(Debug, Clone)]
pub struct IterLines<I>(I);

impl<I> IterLines<I> {
    /// Создаёт источник из любой коллекции строк.
    pub fn new<T>(lines: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self(lines.into_iter())
    }

    /// Извлекает оставшийся итератор.
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I, T> LineSource for IterLines<I>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.0.next().map(Into::into))
    }
}

/// Источник строк поверх текста в памяти, деление по `\n` или `\r\n`.
#[must_use]
pub fn lines_of(text: &str) -> IterLines<std::str::Lines<'_>> {
    IterLines::new(text.lines())
}
