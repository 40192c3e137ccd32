use super::index::ReviewMatch;

/// Renders retrieved reviews into a context block for the model.
///
/// One block per match in input order, blank-line separated. The
/// non-empty rendering starts with a blank line so it can be appended
/// directly to the user's question. Empty input yields an empty string.
pub fn format_matches(matches: &[ReviewMatch]) -> String {
    let mut out = String::new();

    for m in matches {
        out.push_str("\n\nReturned Results:\n");
        out.push_str(&format!("Professor: {}\n", m.id));
        out.push_str(&format!("Review: {}\n", m.metadata.review));
        out.push_str(&format!("Subject: {}\n", m.metadata.subject));
        out.push_str(&format!("Stars: {}", m.metadata.stars));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::index::ReviewMetadata;

    fn make_match(id: &str, review: &str, subject: &str, stars: f64) -> ReviewMatch {
        ReviewMatch {
            id: id.to_string(),
            metadata: ReviewMetadata {
                review: review.to_string(),
                subject: subject.to_string(),
                stars,
            },
        }
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(format_matches(&[]), "");
    }

    #[test]
    fn renders_one_block_per_match_in_order() {
        let matches = vec![
            make_match("prof-a", "Explains clearly.", "Algorithms", 4.5),
            make_match("prof-b", "Tough grader.", "Calculus", 3.0),
        ];

        let block = format_matches(&matches);

        let first = block.find("Professor: prof-a").expect("first match present");
        let second = block.find("Professor: prof-b").expect("second match present");
        assert!(first < second);
        assert!(block.starts_with("\n\n"));
        assert!(block.contains("Review: Explains clearly.\n"));
        assert!(block.contains("Subject: Calculus\n"));
        assert!(block.contains("Stars: 4.5"));
        assert!(block.contains("Stars: 3"));
    }

    #[test]
    fn formatting_is_deterministic() {
        let matches = vec![make_match("prof-a", "Good.", "Physics", 5.0)];
        assert_eq!(format_matches(&matches), format_matches(&matches));
    }

    #[test]
    fn defaulted_metadata_still_renders() {
        let matches = vec![ReviewMatch {
            id: "prof-x".to_string(),
            metadata: ReviewMetadata::default(),
        }];

        let block = format_matches(&matches);
        assert!(block.contains("Professor: prof-x"));
        assert!(block.contains("Review: \n"));
        assert!(block.contains("Stars: 0"));
    }
}
