// src/infra/store.rs

use core::cmp::Ordering;
use core::fmt;

use thiserror::Error;

/// Сравнение ключей хранилища.
///
/// Порядок, который задаёт компаратор, определяет и размещение пар внутри
/// хранилища, и порядок обхода (`first`/`next`, `iter`).
pub trait KeyComparator<K> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Естественный порядок ключей (`Ord`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord> KeyComparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Компаратор-замыкание, когда `Ord` у ключа не подходит.
#[derive(Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<K, F> KeyComparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnComparator")
    }
}

/// Ошибки хранилища.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("Недостаточно памяти для операции с хранилищем")]
    OutOfMemory,

    #[error("Ключ не найден в хранилище")]
    NotFound,
}

#[derive(Clone, Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Упорядоченное ассоциативное хранилище пар ключ/значение.
///
/// Главное:
/// - ключи уникальны, пары лежат в порядке компаратора;
/// - хранилище владеет своими ключами и значениями, наружу отдаются
///   либо ссылки (`get`), либо свежие копии ключей (`first`/`next`);
/// - у каждого экземпляра один курсор обхода: `first()` сбрасывает его
///   на начало, `next()` двигает дальше. Вставка нового ключа и удаление
///   курсор инвалидируют;
/// - `try_copy()` даёт полностью независимую копию со сброшенным курсором.
#[derive(Debug)]
pub struct AssociativeStore<K, V, C = NaturalOrder> {
    entries: Vec<Entry<K, V>>,
    comparator: C,
    cursor: Option<usize>,
}

impl<K: Ord, V> AssociativeStore<K, V, NaturalOrder> {
    /// Пустое хранилище с естественным порядком ключей.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Ord, V> Default for AssociativeStore<K, V, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: KeyComparator<K>> AssociativeStore<K, V, C> {
    /// Пустое хранилище с заданным компаратором.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            entries: Vec::new(),
            comparator,
            cursor: None,
        }
    }

    /// Ok(индекс) если ключ есть, Err(место вставки) если нет.
    fn locate(&self, key: &K) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| self.comparator.compare(&entry.key, key))
    }

    /// Положить пару в хранилище.
    ///
    /// Если ключ уже есть – старое значение уничтожается и заменяется новым.
    /// Если нет памяти под новую пару – хранилище остаётся как было.
    pub fn put(&mut self, key: K, value: V) -> Result<(), StoreError> {
        match self.locate(&key) {
            Ok(idx) => {
                self.entries[idx].value = value;
                Ok(())
            }
            Err(idx) => {
                self.entries
                    .try_reserve(1)
                    .map_err(|_| StoreError::OutOfMemory)?;
                self.entries.insert(idx, Entry { key, value });
                self.cursor = None;
                Ok(())
            }
        }
    }

    /// Ссылка на хранимое значение (без копирования).
    pub fn get(&self, key: &K) -> Option<&V> {
        self.locate(key).ok().map(|idx| &self.entries[idx].value)
    }

    /// Изменяемая ссылка на хранимое значение.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.locate(key) {
            Ok(idx) => Some(&mut self.entries[idx].value),
            Err(_) => None,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.locate(key).is_ok()
    }

    /// Удалить пару. Возвращает вынутое значение.
    pub fn remove(&mut self, key: &K) -> Result<V, StoreError> {
        let idx = self.locate(key).map_err(|_| StoreError::NotFound)?;
        self.cursor = None;
        Ok(self.entries.remove(idx).value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Удалить все пары.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Обход пар по ссылкам, в порядке компаратора.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|e| &mut e.value)
    }
}

impl<K: Clone, V, C: KeyComparator<K>> AssociativeStore<K, V, C> {
    /// Начать обход: курсор на первый ключ, наружу – копия ключа.
    pub fn first(&mut self) -> Option<K> {
        if self.entries.is_empty() {
            self.cursor = None;
            return None;
        }
        self.cursor = Some(0);
        Some(self.entries[0].key.clone())
    }

    /// Следующий ключ обхода (копия).
    ///
    /// `None`, если обход не начат или уже дошёл до конца.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<K> {
        let next_idx = self.cursor? + 1;
        if next_idx >= self.entries.len() {
            self.cursor = None;
            return None;
        }
        self.cursor = Some(next_idx);
        Some(self.entries[next_idx].key.clone())
    }

    /// Снимок ключей: удобно, когда по ходу обхода нужно мутировать хранилище.
    pub fn keys_snapshot(&self) -> Vec<K> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }
}

impl<K: Clone, V: Clone, C: KeyComparator<K> + Clone> AssociativeStore<K, V, C> {
    /// Глубокая копия с тем же компаратором и сброшенным курсором.
    ///
    /// Если не хватило памяти – частично собранная копия просто дропается.
    pub fn try_copy(&self) -> Result<Self, StoreError> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(self.entries.len())
            .map_err(|_| StoreError::OutOfMemory)?;
        entries.extend(self.entries.iter().cloned());

        Ok(Self {
            entries,
            comparator: self.comparator.clone(),
            cursor: None,
        })
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for AssociativeStore<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            comparator: self.comparator.clone(),
            cursor: None,
        }
    }
}
