//! Domain classification by keyword counting.

use serde::{Deserialize, Serialize};

/// Subject-matter category of a résumé. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    CyberForensics,
    Technology,
    Business,
    Finance,
    Science,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::CyberForensics,
        Domain::Technology,
        Domain::Business,
        Domain::Finance,
        Domain::Science,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::CyberForensics => "cyber_forensics",
            Domain::Technology => "technology",
            Domain::Business => "business",
            Domain::Finance => "finance",
            Domain::Science => "science",
        }
    }

    pub fn parse(value: &str) -> Option<Domain> {
        Domain::ALL.into_iter().find(|d| d.as_str() == value)
    }

    /// Phrases whose presence votes for this domain.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Domain::CyberForensics => &[
                "cyber forensics",
                "digital forensics",
                "malware",
                "incident response",
                "network forensics",
                "log analysis",
                "siem",
                "security investigation",
            ],
            Domain::Technology => &[
                "software",
                "developer",
                "programming",
                "python",
                "java",
                "api",
                "cloud",
                "database",
                "web",
                "backend",
                "frontend",
            ],
            Domain::Business => &[
                "management",
                "marketing",
                "operations",
                "strategy",
                "sales",
                "leadership",
                "communication",
                "planning",
            ],
            Domain::Finance => &[
                "accounting",
                "finance",
                "audit",
                "tax",
                "investment",
                "tally",
                "compliance",
                "budget",
                "costing",
            ],
            Domain::Science => &[
                "research",
                "laboratory",
                "experiment",
                "analysis",
                "methodology",
                "biology",
                "chemistry",
                "physics",
                "statistics",
            ],
        }
    }

    /// Substrings a skill phrase must contain to be kept for this domain.
    pub fn skill_hints(self) -> &'static [&'static str] {
        match self {
            Domain::CyberForensics => &[
                "forensics",
                "malware",
                "security",
                "incident",
                "network",
                "wireshark",
                "autopsy",
                "ftk",
                "encase",
                "siem",
                "logs",
                "linux",
            ],
            Domain::Technology => &[
                "python",
                "java",
                "sql",
                "javascript",
                "react",
                "angular",
                "node",
                "django",
                "flask",
                "aws",
                "azure",
                "docker",
                "linux",
                "api",
                "cloud",
                "devops",
            ],
            Domain::Business => &[
                "marketing",
                "operations",
                "strategy",
                "sales",
                "management",
                "crm",
                "communication",
                "leadership",
                "analysis",
            ],
            Domain::Finance => &[
                "accounting",
                "tax",
                "audit",
                "investment",
                "finance",
                "tally",
                "budgeting",
                "compliance",
                "costing",
            ],
            Domain::Science => &[
                "research",
                "analysis",
                "laboratory",
                "experiment",
                "statistics",
                "methodology",
                "data",
            ],
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of the domain's keywords occurring anywhere in `text`.
/// Plain substring search: "java" also counts inside "javascript".
pub fn keyword_hits(text: &str, domain: Domain) -> usize {
    domain
        .keywords()
        .iter()
        .filter(|&&kw| text.contains(kw))
        .count()
}

/// Picks the domain with the most keyword hits. Ties, including the all-zero
/// case, go to the domain declared first.
pub fn classify(text: &str) -> Domain {
    let mut best = Domain::ALL[0];
    let mut best_hits = keyword_hits(text, best);

    for &domain in &Domain::ALL[1..] {
        let hits = keyword_hits(text, domain);
        if hits > best_hits {
            best = domain;
            best_hits = hits;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_selects_first_domain() {
        assert_eq!(classify("gardening and pottery"), Domain::CyberForensics);
        assert_eq!(classify(""), Domain::CyberForensics);
    }

    #[test]
    fn test_highest_count_wins() {
        let text = "backend developer writing python and java for the web";
        assert_eq!(classify(text), Domain::Technology);
    }

    #[test]
    fn test_tie_goes_to_earlier_domain() {
        // one finance hit (audit), one science hit (research)
        assert_eq!(classify("audit and research"), Domain::Finance);
        // one business hit (sales), one finance hit (tax)
        assert_eq!(classify("sales tax"), Domain::Business);
    }

    #[test]
    fn test_keywords_match_inside_larger_words() {
        // "java" inside "javascript", "web" inside "webpack"
        assert_eq!(keyword_hits("javascript webpack", Domain::Technology), 2);
    }

    #[test]
    fn test_each_keyword_counted_once() {
        assert_eq!(keyword_hits("malware malware malware", Domain::CyberForensics), 1);
    }

    #[test]
    fn test_multi_word_keywords() {
        let text = "led incident response and log analysis with siem tooling";
        assert_eq!(keyword_hits(text, Domain::CyberForensics), 3);
        assert_eq!(classify(text), Domain::CyberForensics);
    }

    #[test]
    fn test_domain_serializes_snake_case() {
        let json = serde_json::to_string(&Domain::CyberForensics).unwrap();
        assert_eq!(json, r#""cyber_forensics""#);
        for d in Domain::ALL {
            assert_eq!(Domain::parse(d.as_str()), Some(d));
            assert_eq!(serde_json::to_string(&d).unwrap(), format!("\"{d}\""));
        }
        assert_eq!(Domain::parse("law"), None);
    }
}
