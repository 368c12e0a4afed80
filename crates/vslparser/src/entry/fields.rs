//! Многозначное отображение тегов записи.

use std::collections::{BTreeMap, btree_map};

use serde::Serialize;

/// Отображение «тег → значения в порядке появления».
///
/// Тег может встречаться в теле записи несколько раз, все его значения
/// сохраняются. Ключи сравниваются точно, с учётом регистра. Порядок
/// обхода тегов лексикографический.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, Vec<String>>);

impl Fields {
    /// Создаёт пустое отображение.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет значение в конец последовательности тега.
    pub fn push(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.0.entry(tag.into()).or_default().push(value.into());
    }

    /// Все значения тега.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.0.get(tag).map(Vec::as_slice)
    }

    /// Первое значение тега.
    #[must_use]
    pub fn first(&self, tag: &str) -> Option<&str> {
        self.get(tag).and_then(<[String]>::first).map(String::as_str)
    }

    /// Последнее значение тега.
    #[must_use]
    pub fn last(&self, tag: &str) -> Option<&str> {
        self.get(tag).and_then(<[String]>::last).map(String::as_str)
    }

    /// Есть ли у записи такой тег.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains_key(tag)
    }

    /// Количество различных тегов.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Нет ни одного тега.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Имена тегов.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Пары «тег, значение», по одной на каждое значение.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(tag, values)| values.iter().map(move |v| (tag.as_str(), v.as_str())))
    }

    /// Оставляет только перечисленные теги.
    #[must_use]
    pub fn retain_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.0.retain(|tag, _| tags.iter().any(|t| t.as_ref() == tag));
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (tag, value) in iter {
            fields.push(tag, value);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, Vec<String>);
    type IntoIter = btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
