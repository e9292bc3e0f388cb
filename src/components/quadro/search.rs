use serde::{Deserialize, Serialize};

use super::records::CpfRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchMode {
	/// Free-text: matches the CPF number or the person's name.
	#[default]
	IdentifierOrName,
	/// Matches the CPF number only.
	IdentifierOnly,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
	pub term: String,
	pub mode: SearchMode,
}

impl SearchFilter {
	pub fn new(term: impl Into<String>, mode: SearchMode) -> Self {
		Self {
			term: term.into(),
			mode,
		}
	}

	/// Case-insensitive substring match. An empty term matches everyone.
	pub fn matches(&self, record: &CpfRecord) -> bool {
		let needle = self.term.to_lowercase();
		if record.cpf.to_lowercase().contains(&needle) {
			return true;
		}
		match self.mode {
			SearchMode::IdentifierOnly => false,
			SearchMode::IdentifierOrName => record.nome.to_lowercase().contains(&needle),
		}
	}

	pub fn apply<'a>(&self, records: &'a [CpfRecord]) -> Vec<&'a CpfRecord> {
		records.iter().filter(|r| self.matches(r)).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn jane() -> CpfRecord {
		CpfRecord {
			id: 1,
			cpf: "111.111.111-11".into(),
			nome: "Jane Doe".into(),
			foto: None,
		}
	}

	#[test]
	fn name_matches_only_in_free_text_mode() {
		let record = jane();
		assert!(SearchFilter::new("jane", SearchMode::IdentifierOrName).matches(&record));
		assert!(!SearchFilter::new("jane", SearchMode::IdentifierOnly).matches(&record));
	}

	#[test]
	fn identifier_substring_matches_in_both_modes() {
		let record = jane();
		for mode in [SearchMode::IdentifierOrName, SearchMode::IdentifierOnly] {
			assert!(SearchFilter::new("111.1", mode).matches(&record));
			assert!(!SearchFilter::new("222", mode).matches(&record));
		}
	}

	#[test]
	fn empty_term_matches_all() {
		let records = vec![jane(), CpfRecord { id: 2, ..jane() }];
		assert_eq!(SearchFilter::default().apply(&records).len(), 2);
	}

	#[test]
	fn matching_ignores_case() {
		assert!(SearchFilter::new("DOE", SearchMode::IdentifierOrName).matches(&jane()));
	}
}
