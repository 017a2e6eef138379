// File: src/store.rs
//! In-memory, ordered task collection.
//!
//! Positions are 1-based everywhere outside this module. Every operation that
//! takes a user-facing number validates it before turning it into an offset.
use crate::error::ValidationError;
use crate::model::Task;
use std::collections::HashSet;

/// A task paired with the 1-based position it had when the result was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedTask {
    pub index: usize,
    pub task: Task,
}

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-persisted tasks. No duplicate check is applied on load.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn size(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Adds a new task at the end, refusing one with the same details as an
    /// existing task.
    pub fn append(&mut self, task: Task) -> Result<(), ValidationError> {
        if self.tasks.iter().any(|t| t.has_same_details(&task)) {
            return Err(ValidationError::DuplicateTask);
        }
        self.tasks.push(task);
        Ok(())
    }

    pub fn get_at(&self, index: usize) -> Result<&Task, ValidationError> {
        self.tasks
            .get(index)
            .ok_or(ValidationError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Task, ValidationError> {
        if index >= self.size() {
            return Err(ValidationError::IndexOutOfRange {
                index,
                size: self.size(),
            });
        }
        Ok(self.tasks.remove(index))
    }

    pub fn ensure_index_in_range_1_based(&self, number: usize) -> Result<(), ValidationError> {
        if number < 1 || number > self.size() {
            return Err(ValidationError::OutOfRange {
                number,
                size: self.size(),
            });
        }
        Ok(())
    }

    /// Every task with its 1-based position, in list order.
    pub fn snapshot(&self) -> Vec<IndexedTask> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, task)| IndexedTask {
                index: i + 1,
                task: task.clone(),
            })
            .collect()
    }

    /// Case-insensitive substring search over descriptions. No match is an
    /// empty result, not an error.
    pub fn find_by_keyword(&self, keyword: &str) -> Vec<IndexedTask> {
        let needle = keyword.to_lowercase();
        self.snapshot()
            .into_iter()
            .filter(|it| it.task.description().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn mark_many(&mut self, numbers: &[usize]) -> Result<Vec<IndexedTask>, ValidationError> {
        self.update_many(numbers, Task::mark)
    }

    pub fn unmark_many(&mut self, numbers: &[usize]) -> Result<Vec<IndexedTask>, ValidationError> {
        self.update_many(numbers, Task::unmark)
    }

    /// Removes several tasks at once. Removal runs from the highest number
    /// down so earlier removals never shift later targets; the result lists
    /// the removed tasks in the order the numbers were given.
    pub fn delete_many(&mut self, numbers: &[usize]) -> Result<Vec<IndexedTask>, ValidationError> {
        self.validate_all(numbers)?;

        let mut descending = numbers.to_vec();
        descending.sort_unstable_by(|a, b| b.cmp(a));

        let mut removed = Vec::with_capacity(numbers.len());
        for number in descending {
            let task = self.remove_at(number - 1)?;
            removed.push(IndexedTask {
                index: number,
                task,
            });
        }

        Ok(numbers
            .iter()
            .filter_map(|n| {
                let pos = removed.iter().position(|it| it.index == *n)?;
                Some(removed.swap_remove(pos))
            })
            .collect())
    }

    fn update_many(
        &mut self,
        numbers: &[usize],
        apply: fn(&mut Task),
    ) -> Result<Vec<IndexedTask>, ValidationError> {
        self.validate_all(numbers)?;

        let mut results = Vec::with_capacity(numbers.len());
        for &number in numbers {
            let task = &mut self.tasks[number - 1];
            apply(task);
            results.push(IndexedTask {
                index: number,
                task: task.clone(),
            });
        }
        Ok(results)
    }

    /// All-or-nothing check run before any bulk mutation.
    fn validate_all(&self, numbers: &[usize]) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for &number in numbers {
            self.ensure_index_in_range_1_based(number)?;
            if !seen.insert(number) {
                return Err(ValidationError::DuplicateIndex(number));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(names: &[&str]) -> TaskList {
        TaskList::from_tasks(names.iter().map(|n| Task::plain(n).unwrap()).collect())
    }

    #[test]
    fn test_add_and_remove_updates_size() {
        let mut list = TaskList::new();
        list.append(Task::plain("read").unwrap()).unwrap();
        list.append(Task::plain("write").unwrap()).unwrap();
        assert_eq!(list.size(), 2);

        list.remove_at(0).unwrap();
        assert_eq!(list.size(), 1);
        assert_eq!(list.get_at(0).unwrap().description(), "write");
    }

    #[test]
    fn test_offsets_out_of_range() {
        let mut list = list_of(&["a"]);
        assert!(matches!(
            list.get_at(1),
            Err(ValidationError::IndexOutOfRange { index: 1, size: 1 })
        ));
        assert!(list.remove_at(5).is_err());
        assert_eq!(list.size(), 1);
    }

    #[test]
    fn test_update_many_marks_in_input_order() {
        let mut list = list_of(&["a", "b", "c"]);
        let res = list.mark_many(&[3, 1]).unwrap();
        assert_eq!(res.iter().map(|r| r.index).collect::<Vec<_>>(), vec![3, 1]);
        assert!(list.get_at(0).unwrap().is_done());
        assert!(!list.get_at(1).unwrap().is_done());
        assert!(list.get_at(2).unwrap().is_done());

        let res = list.unmark_many(&[1]).unwrap();
        assert!(!res[0].task.is_done());
    }

    #[test]
    fn test_bulk_rejects_duplicates_without_mutating() {
        let mut list = list_of(&["a", "b"]);
        assert_eq!(
            list.delete_many(&[1, 1]),
            Err(ValidationError::DuplicateIndex(1))
        );
        assert_eq!(list.size(), 2);
    }
}
