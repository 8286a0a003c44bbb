use serde_json::Value;

#[derive(Clone, Debug)]
pub struct ProfileRecord {
    pub id: i64,
    pub json_content: Value,
    pub created_at: Option<String>,
}

/// Cursor over the fetched record list. The list is fixed at fetch time and
/// already ordered newest-first by the store; navigation wraps modulo the
/// list length and every operation is a no-op on an empty list.
pub struct RecordSession {
    records: Vec<ProfileRecord>,
    haystacks: Vec<String>,
    cursor: usize,
}

impl RecordSession {
    pub fn new(records: Vec<ProfileRecord>) -> Self {
        let haystacks = records
            .iter()
            .map(|record| record.json_content.to_string().to_lowercase())
            .collect();
        Self {
            records,
            haystacks,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&ProfileRecord> {
        self.records.get(self.cursor)
    }

    /// Advances the cursor, wrapping at the end. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.records.is_empty() {
            return false;
        }
        self.cursor = (self.cursor + 1) % self.records.len();
        true
    }

    /// Steps the cursor back, wrapping at the start. Returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.records.is_empty() {
            return false;
        }
        self.cursor = (self.cursor + self.records.len() - 1) % self.records.len();
        true
    }

    /// Case-insensitive substring search over each record's serialized
    /// document, scanning from index 0. The cursor jumps to the first match
    /// and stays put when nothing matches. Blank terms are a no-op rather
    /// than trivially matching index 0. Returns whether the cursor moved.
    pub fn search_first_match(&mut self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }

        let Some(index) = self
            .haystacks
            .iter()
            .position(|haystack| haystack.contains(&needle))
        else {
            return false;
        };

        let moved = index != self.cursor;
        self.cursor = index;
        moved
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn session_of(documents: Vec<Value>) -> RecordSession {
        let records = documents
            .into_iter()
            .enumerate()
            .map(|(index, json_content)| ProfileRecord {
                id: index as i64 + 1,
                json_content,
                created_at: None,
            })
            .collect();
        RecordSession::new(records)
    }

    fn plain_session(count: usize) -> RecordSession {
        session_of((0..count).map(|index| json!({ "record": index })).collect())
    }

    #[test]
    fn navigation_wraps_in_both_directions() {
        let mut session = plain_session(5);
        assert_eq!(session.cursor(), 0);

        assert!(session.previous());
        assert_eq!(session.cursor(), 4);

        assert!(session.next());
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn navigation_is_inert_on_an_empty_list() {
        let mut session = plain_session(0);

        assert!(!session.next());
        assert!(!session.previous());
        assert!(!session.search_first_match("anything"));
        assert_eq!(session.cursor(), 0);
        assert!(session.current().is_none());
    }

    #[test]
    fn search_jumps_to_the_first_case_insensitive_match() {
        let mut session = session_of(vec![
            json!({ "topic": "Communication" }),
            json!({ "topic": "Creativity" }),
            json!({ "topic": "Leadership basics" }),
            json!({ "topic": "Leadership advanced" }),
        ]);

        assert!(session.search_first_match("leadership"));
        assert_eq!(session.cursor(), 2);
    }

    #[test]
    fn search_without_a_match_leaves_the_cursor() {
        let mut session = session_of(vec![
            json!({ "topic": "Communication" }),
            json!({ "topic": "Creativity" }),
        ]);
        session.next();

        assert!(!session.search_first_match("does-not-exist"));
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn blank_search_terms_are_a_no_op() {
        let mut session = plain_session(3);
        session.next();

        assert!(!session.search_first_match(""));
        assert!(!session.search_first_match("   "));
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn search_matches_keys_and_values_of_the_serialized_document() {
        let mut session = session_of(vec![
            json!({ "plain": true }),
            json!({ "Skills": { "strength": 7 } }),
        ]);

        assert!(session.search_first_match("SKILLS"));
        assert_eq!(session.cursor(), 1);
    }
}
