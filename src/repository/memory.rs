use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::models::{Event, EventInput};
use crate::repository::{active_filter, EventRepository};

/// In-process store mirroring the MySQL repository.
///
/// Filtering follows `LIKE '%filter%'` wildcards and ignores case, but unlike
/// `utf8mb4_unicode_ci` it does not fold accents: `celebracao` will not match
/// `Celebração` here.
#[derive(Default)]
pub struct MemoryEventRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Event>,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

enum LikeToken {
    AnyRun,
    AnyOne,
    Literal(char),
}

/// `%filter%` as LIKE tokens: `%` any run, `_` one character, `\` escapes.
fn like_pattern(filter: &str) -> Vec<LikeToken> {
    let mut tokens = vec![LikeToken::AnyRun];
    let mut chars = filter.to_lowercase().chars().collect::<Vec<_>>().into_iter();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::AnyRun,
            '_' => LikeToken::AnyOne,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            other => LikeToken::Literal(other),
        });
    }
    tokens.push(LikeToken::AnyRun);
    tokens
}

fn like_matches(haystack: Option<&str>, pattern: &[LikeToken]) -> bool {
    let Some(haystack) = haystack else {
        return false;
    };
    let text: Vec<char> = haystack.to_lowercase().chars().collect();

    let (mut t, mut p) = (0, 0);
    // last `%` seen and the text position it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;
    while t < text.len() {
        match pattern.get(p) {
            Some(LikeToken::AnyRun) => {
                backtrack = Some((p, t));
                p += 1;
                continue;
            }
            Some(LikeToken::AnyOne) => {
                t += 1;
                p += 1;
                continue;
            }
            Some(LikeToken::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
                continue;
            }
            _ => {}
        }
        match backtrack {
            Some((star, absorbed)) => {
                p = star + 1;
                t = absorbed + 1;
                backtrack = Some((star, absorbed + 1));
            }
            None => return false,
        }
    }
    pattern[p..].iter().all(|token| matches!(token, LikeToken::AnyRun))
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn list(&self, filter: Option<&str>) -> StoreResult<Vec<Event>> {
        let inner = self.inner.read().await;
        let events = match active_filter(filter) {
            None => inner.rows.values().cloned().collect(),
            Some(text) => {
                let pattern = like_pattern(text);
                inner
                    .rows
                    .values()
                    .filter(|e| {
                        like_matches(Some(&e.title), &pattern)
                            || like_matches(e.description.as_deref(), &pattern)
                            || like_matches(e.event_type.as_deref(), &pattern)
                    })
                    .cloned()
                    .collect()
            }
        };
        Ok(events)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Event>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: &EventInput) -> StoreResult<i64> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(id, input.clone().into_event(id));
        Ok(id)
    }

    async fn update_by_id(&self, id: i64, input: &EventInput) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(row) = inner.rows.get_mut(&id) {
            *row = input.clone().into_event(id);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }
}
