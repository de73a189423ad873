//! The fixed record counts behind the PRISMA diagram.
//!
//! The dataset is hardcoded (simulated database retrieval); nothing here
//! touches the network or disk.

/// Identification -> deduplication stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deduplication {
    pub duplicates_removed: u32,
    pub records_after_deduplication: u32,
}

/// Title/abstract screening stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screening {
    pub selected_for_screening: u32,
    pub excluded: u32,
}

/// Full-text eligibility stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub full_text_assessed: u32,
    pub excluded: u32,
}

/// Record counts for every stage of the review funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewCounts {
    pub identification: u32,
    pub deduplication: Deduplication,
    pub screening: Screening,
    pub eligibility: Eligibility,
    pub included: u32,
}

/// The seed dataset, carried over verbatim from the source data.
///
/// Known inconsistency: `duplicates_removed` is 3163 - 654 = 2509, while
/// `records_after_deduplication` is hardcoded to 2333 (which would imply 830
/// duplicates removed). Both values are kept as-is; see
/// [`ReviewCounts::consistency_notes`].
pub fn seed_counts() -> ReviewCounts {
    ReviewCounts {
        identification: 3163,
        deduplication: Deduplication {
            duplicates_removed: 3163 - 654,
            records_after_deduplication: 2333,
        },
        screening: Screening {
            selected_for_screening: 2509,
            excluded: 2333,
        },
        eligibility: Eligibility {
            full_text_assessed: 176,
            excluded: 35,
        },
        included: 141,
    }
}

impl ReviewCounts {
    /// Checks the funnel arithmetic between adjacent stages.
    ///
    /// Returns one note per violated relationship. The notes are advisory:
    /// rendering always uses the literal values and never derives or corrects
    /// a count.
    pub fn consistency_notes(&self) -> Vec<String> {
        let mut notes = Vec::new();

        let expected_after_dedup = self
            .identification
            .saturating_sub(self.deduplication.duplicates_removed);
        if expected_after_dedup != self.deduplication.records_after_deduplication {
            notes.push(format!(
                "records_after_deduplication is {} but identification ({}) minus duplicates_removed ({}) is {}",
                self.deduplication.records_after_deduplication,
                self.identification,
                self.deduplication.duplicates_removed,
                expected_after_dedup
            ));
        }

        if self.screening.selected_for_screening > self.deduplication.records_after_deduplication {
            notes.push(format!(
                "selected_for_screening ({}) exceeds records_after_deduplication ({})",
                self.screening.selected_for_screening,
                self.deduplication.records_after_deduplication
            ));
        }

        let expected_full_text = self
            .screening
            .selected_for_screening
            .saturating_sub(self.screening.excluded);
        if expected_full_text != self.eligibility.full_text_assessed {
            notes.push(format!(
                "full_text_assessed is {} but selected_for_screening ({}) minus screening excluded ({}) is {}",
                self.eligibility.full_text_assessed,
                self.screening.selected_for_screening,
                self.screening.excluded,
                expected_full_text
            ));
        }

        let expected_included = self
            .eligibility
            .full_text_assessed
            .saturating_sub(self.eligibility.excluded);
        if expected_included != self.included {
            notes.push(format!(
                "included is {} but full_text_assessed ({}) minus eligibility excluded ({}) is {}",
                self.included,
                self.eligibility.full_text_assessed,
                self.eligibility.excluded,
                expected_included
            ));
        }

        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_values_are_the_literal_dataset() {
        let counts = seed_counts();
        assert_eq!(counts.identification, 3163);
        assert_eq!(counts.deduplication.duplicates_removed, 2509);
        assert_eq!(counts.deduplication.records_after_deduplication, 2333);
        assert_eq!(counts.screening.selected_for_screening, 2509);
        assert_eq!(counts.screening.excluded, 2333);
        assert_eq!(counts.eligibility.full_text_assessed, 176);
        assert_eq!(counts.eligibility.excluded, 35);
        assert_eq!(counts.included, 141);
    }

    #[test]
    fn seed_data_inconsistency_is_flagged() {
        let notes = seed_counts().consistency_notes();
        assert!(
            notes
                .iter()
                .any(|n| n.contains("records_after_deduplication")),
            "deduplication mismatch should be surfaced: {:?}",
            notes
        );
    }

    #[test]
    fn consistent_counts_produce_no_notes() {
        let counts = ReviewCounts {
            identification: 100,
            deduplication: Deduplication {
                duplicates_removed: 20,
                records_after_deduplication: 80,
            },
            screening: Screening {
                selected_for_screening: 80,
                excluded: 50,
            },
            eligibility: Eligibility {
                full_text_assessed: 30,
                excluded: 10,
            },
            included: 20,
        };
        assert!(counts.consistency_notes().is_empty());
    }
}
