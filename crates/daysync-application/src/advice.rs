//! Advice from the most recent analysis.

use daysync_core::Result;
use daysync_core::entry::{DayEntry, EntryRepository};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedAdvice {
    /// 1-based presentation rank.
    pub rank: usize,
    pub text: String,
}

/// The latest entry's advice, verbatim and in order. Empty means "no advice
/// yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdviceList {
    pub items: Vec<RankedAdvice>,
    pub source_entry_id: Option<String>,
}

impl AdviceList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Builds the advice list from entries in store order (newest first).
pub fn present_advice(entries: &[DayEntry]) -> AdviceList {
    let Some(latest) = entries.first() else {
        return AdviceList::default();
    };

    AdviceList {
        items: latest
            .analysis
            .advice
            .iter()
            .enumerate()
            .map(|(i, text)| RankedAdvice {
                rank: i + 1,
                text: text.clone(),
            })
            .collect(),
        source_entry_id: Some(latest.id.clone()),
    }
}

pub struct AdvicePresenter {
    entries: Arc<dyn EntryRepository>,
}

impl AdvicePresenter {
    pub fn new(entries: Arc<dyn EntryRepository>) -> Self {
        Self { entries }
    }

    pub async fn current(&self) -> Result<AdviceList> {
        let entries = self.entries.load_entries().await?;
        Ok(present_advice(&entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockEntryRepository, entry_at};

    #[test]
    fn test_ranks_are_one_based_and_verbatim() {
        let mut latest = entry_at(0, 70);
        latest.analysis.advice = vec!["  Stretch  ".to_string(), "Call Mum".to_string()];
        let list = present_advice(&[latest.clone(), entry_at(1, 20)]);

        assert_eq!(
            list.items,
            vec![
                RankedAdvice {
                    rank: 1,
                    text: "  Stretch  ".to_string()
                },
                RankedAdvice {
                    rank: 2,
                    text: "Call Mum".to_string()
                },
            ]
        );
        assert_eq!(list.source_entry_id, Some(latest.id));
    }

    #[test]
    fn test_empty_advice_is_valid() {
        assert!(present_advice(&[]).is_empty());

        let mut latest = entry_at(0, 50);
        latest.analysis.advice.clear();
        let list = present_advice(&[latest]);
        assert!(list.is_empty());
        assert!(list.source_entry_id.is_some());
    }

    #[tokio::test]
    async fn test_presenter_reads_store() {
        let repository = Arc::new(MockEntryRepository::with_entries(vec![entry_at(0, 50)]));
        let list = AdvicePresenter::new(repository).current().await.unwrap();
        assert_eq!(list.items.len(), 2);
    }
}
