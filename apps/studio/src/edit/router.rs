//! Inline-edit routing: resolving a committed (address, value) pair into a
//! structural update of the document.
//!
//! Routing is a deliberate soft-fail: an address that matches nothing — an
//! unknown leaf, an out-of-range index — is dropped with a warning and the
//! document comes back unchanged, so unexpected markup never interrupts the
//! editing flow. A collection index is never auto-extended.
//!
//! The returned document is a structural copy: only the nodes along the
//! edited path are cloned, everything else stays `Arc`-shared with the input
//! so hosts can detect change with pointer comparisons.

use std::sync::Arc;

use tracing::warn;

use crate::model::{
    Collection, CoverLetterContent, Document, FieldAddress, PersonalInfo, ResumeContent,
};

/// Applies one committed inline edit, returning the updated document.
///
/// On a routing miss the input is returned as an unchanged structural clone
/// (deep-equal, all children reference-equal).
pub fn apply_edit(document: &Document, address: &FieldAddress, new_value: &str) -> Document {
    let mut next = document.clone();
    let routed = match (&mut next, address) {
        (Document::Resume(r), FieldAddress::Scalar { leaf }) => {
            route_resume_scalar(r, leaf, new_value)
        }
        (
            Document::Resume(r),
            FieldAddress::Item {
                collection,
                index,
                leaf,
            },
        ) => route_resume_item(r, *collection, *index, leaf, new_value),
        (Document::CoverLetter(c), FieldAddress::Scalar { leaf }) => {
            route_letter_scalar(c, leaf, new_value)
        }
        // Cover letters have no indexed collections.
        (Document::CoverLetter(_), FieldAddress::Item { .. }) => false,
    };

    if !routed {
        warn!(address = %address, kind = document.kind().key(), "inline edit matched no field, dropped");
    }
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar routing
// ────────────────────────────────────────────────────────────────────────────

fn route_personal(personal: &mut Arc<PersonalInfo>, leaf: &str, value: &str) -> bool {
    match leaf {
        "first_name" => Arc::make_mut(personal).first_name = value.to_string(),
        "last_name" => Arc::make_mut(personal).last_name = value.to_string(),
        "job_title" => Arc::make_mut(personal).job_title = value.to_string(),
        "email" => Arc::make_mut(personal).email = value.to_string(),
        "phone" => Arc::make_mut(personal).phone = value.to_string(),
        "address" => Arc::make_mut(personal).address = value.to_string(),
        "city" => Arc::make_mut(personal).city = value.to_string(),
        "country" => Arc::make_mut(personal).country = value.to_string(),
        "photo_url" => Arc::make_mut(personal).photo_url = Some(value.to_string()),
        _ => return false,
    }
    true
}

fn route_resume_scalar(r: &mut ResumeContent, leaf: &str, value: &str) -> bool {
    if route_personal(&mut r.personal_info, leaf, value) {
        return true;
    }
    match leaf {
        "summary" => {
            r.summary = value.to_string();
            true
        }
        _ => false,
    }
}

fn route_letter_scalar(c: &mut CoverLetterContent, leaf: &str, value: &str) -> bool {
    if route_personal(&mut c.personal_info, leaf, value) {
        return true;
    }
    match leaf {
        "company" => Arc::make_mut(&mut c.recipient_info).company = value.to_string(),
        "manager" => Arc::make_mut(&mut c.recipient_info).manager = value.to_string(),
        "company_address" => {
            Arc::make_mut(&mut c.recipient_info).company_address = value.to_string()
        }
        "company_city" => Arc::make_mut(&mut c.recipient_info).company_city = value.to_string(),
        "position" => Arc::make_mut(&mut c.job_info).position = value.to_string(),
        "reference" => Arc::make_mut(&mut c.job_info).reference = value.to_string(),
        "body" => c.body = value.to_string(),
        _ => return false,
    }
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Item routing
// ────────────────────────────────────────────────────────────────────────────

fn route_resume_item(
    r: &mut ResumeContent,
    collection: Collection,
    index: usize,
    leaf: &str,
    value: &str,
) -> bool {
    match collection {
        Collection::Experience => {
            let Some(entry) = r.experience.get_mut(index) else {
                return false;
            };
            match leaf {
                "job_title" => Arc::make_mut(entry).job_title = value.to_string(),
                "employer" => Arc::make_mut(entry).employer = value.to_string(),
                "city" => Arc::make_mut(entry).city = value.to_string(),
                "start_date" => Arc::make_mut(entry).start_date = value.to_string(),
                "end_date" => Arc::make_mut(entry).end_date = value.to_string(),
                "description" => Arc::make_mut(entry).description = value.to_string(),
                _ => return false,
            }
            true
        }
        Collection::Education => {
            let Some(entry) = r.education.get_mut(index) else {
                return false;
            };
            match leaf {
                "school" => Arc::make_mut(entry).school = value.to_string(),
                "degree" => Arc::make_mut(entry).degree = value.to_string(),
                "city" => Arc::make_mut(entry).city = value.to_string(),
                "start_date" => Arc::make_mut(entry).start_date = value.to_string(),
                "end_date" => Arc::make_mut(entry).end_date = value.to_string(),
                "description" => Arc::make_mut(entry).description = value.to_string(),
                _ => return false,
            }
            true
        }
        Collection::Skills => {
            let Some(entry) = r.skills.get_mut(index) else {
                return false;
            };
            match leaf {
                "name" => Arc::make_mut(entry).name = value.to_string(),
                "level" => Arc::make_mut(entry).level = value.to_string(),
                _ => return false,
            }
            true
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExperienceEntry, JobInfo, RecipientInfo, SkillEntry};

    fn resume_with_two_jobs() -> Document {
        Document::Resume(ResumeContent {
            personal_info: Arc::new(PersonalInfo {
                first_name: "Ada".to_string(),
                ..Default::default()
            }),
            summary: "Original summary.".to_string(),
            experience: vec![
                Arc::new(ExperienceEntry {
                    job_title: "Junior".to_string(),
                    description: "First job.".to_string(),
                    ..Default::default()
                }),
                Arc::new(ExperienceEntry {
                    job_title: "Senior".to_string(),
                    description: "Second job.".to_string(),
                    ..Default::default()
                }),
            ],
            education: vec![],
            skills: vec![Arc::new(SkillEntry {
                name: "Rust".to_string(),
                level: "Expert".to_string(),
            })],
        })
    }

    fn as_resume(doc: &Document) -> &ResumeContent {
        match doc {
            Document::Resume(r) => r,
            _ => panic!("expected resume"),
        }
    }

    // ── round trips ─────────────────────────────────────────────────────────

    #[test]
    fn test_edit_round_trip_on_collection_item() {
        // Scenario: commit "Led X" at experience[1].description.
        let doc = resume_with_two_jobs();
        let addr = FieldAddress::item(Collection::Experience, 1, "description");
        let next = apply_edit(&doc, &addr, "Led X");
        assert_eq!(as_resume(&next).experience[1].description, "Led X");
    }

    #[test]
    fn test_edit_round_trip_on_personal_scalar() {
        let doc = resume_with_two_jobs();
        let next = apply_edit(&doc, &FieldAddress::scalar("email"), "ada@babbage.uk");
        assert_eq!(as_resume(&next).personal_info.email, "ada@babbage.uk");
    }

    #[test]
    fn test_edit_round_trip_on_top_level_scalar() {
        let doc = resume_with_two_jobs();
        let next = apply_edit(&doc, &FieldAddress::scalar("summary"), "New summary.");
        assert_eq!(as_resume(&next).summary, "New summary.");
    }

    // ── structural isolation ────────────────────────────────────────────────

    #[test]
    fn test_edit_touches_only_the_addressed_entry() {
        let doc = resume_with_two_jobs();
        let addr = FieldAddress::item(Collection::Experience, 1, "description");
        let next = apply_edit(&doc, &addr, "Led X");

        let before = as_resume(&doc);
        let after = as_resume(&next);
        assert!(
            Arc::ptr_eq(&before.experience[0], &after.experience[0]),
            "untouched sibling entry must stay reference-equal"
        );
        assert!(!Arc::ptr_eq(&before.experience[1], &after.experience[1]));
        assert!(Arc::ptr_eq(&before.personal_info, &after.personal_info));
        assert!(Arc::ptr_eq(&before.skills[0], &after.skills[0]));
        assert_eq!(before.summary, after.summary);
    }

    #[test]
    fn test_personal_edit_leaves_collections_shared() {
        let doc = resume_with_two_jobs();
        let next = apply_edit(&doc, &FieldAddress::scalar("first_name"), "Augusta");
        let before = as_resume(&doc);
        let after = as_resume(&next);
        assert!(!Arc::ptr_eq(&before.personal_info, &after.personal_info));
        assert!(Arc::ptr_eq(&before.experience[0], &after.experience[0]));
        assert!(Arc::ptr_eq(&before.experience[1], &after.experience[1]));
    }

    // ── routing misses ──────────────────────────────────────────────────────

    #[test]
    fn test_unknown_leaf_is_a_silent_no_op() {
        let doc = resume_with_two_jobs();
        let next = apply_edit(&doc, &FieldAddress::scalar("hobbies"), "chess");
        assert_eq!(doc, next, "routing miss must leave the document deep-equal");
    }

    #[test]
    fn test_unknown_item_leaf_is_a_no_op_without_cloning() {
        let doc = resume_with_two_jobs();
        let addr = FieldAddress::item(Collection::Experience, 0, "salary");
        let next = apply_edit(&doc, &addr, "1");
        assert_eq!(doc, next);
        assert!(Arc::ptr_eq(
            &as_resume(&doc).experience[0],
            &as_resume(&next).experience[0]
        ));
    }

    #[test]
    fn test_out_of_range_index_never_extends_the_collection() {
        let doc = resume_with_two_jobs();
        let addr = FieldAddress::item(Collection::Experience, 7, "description");
        let next = apply_edit(&doc, &addr, "ghost");
        assert_eq!(doc, next);
        assert_eq!(as_resume(&next).experience.len(), 2);
    }

    #[test]
    fn test_item_address_on_cover_letter_is_dropped() {
        let doc = Document::CoverLetter(CoverLetterContent::default());
        let addr = FieldAddress::item(Collection::Skills, 0, "name");
        let next = apply_edit(&doc, &addr, "x");
        assert_eq!(doc, next);
    }

    // ── cover-letter scalars ────────────────────────────────────────────────

    #[test]
    fn test_letter_recipient_and_job_fields_route() {
        let doc = Document::CoverLetter(CoverLetterContent {
            recipient_info: Arc::new(RecipientInfo::default()),
            job_info: Arc::new(JobInfo::default()),
            ..Default::default()
        });
        let next = apply_edit(&doc, &FieldAddress::scalar("company"), "Initech");
        let next = apply_edit(&next, &FieldAddress::scalar("position"), "Architect");
        let next = apply_edit(&next, &FieldAddress::scalar("body"), "Dear team,");
        match next {
            Document::CoverLetter(c) => {
                assert_eq!(c.recipient_info.company, "Initech");
                assert_eq!(c.job_info.position, "Architect");
                assert_eq!(c.body, "Dear team,");
            }
            _ => panic!("expected cover letter"),
        }
    }

    #[test]
    fn test_letter_edit_keeps_unrelated_blocks_shared() {
        let doc = Document::CoverLetter(CoverLetterContent::default());
        let next = apply_edit(&doc, &FieldAddress::scalar("company"), "Initech");
        match (&doc, &next) {
            (Document::CoverLetter(a), Document::CoverLetter(b)) => {
                assert!(Arc::ptr_eq(&a.personal_info, &b.personal_info));
                assert!(Arc::ptr_eq(&a.job_info, &b.job_info));
                assert!(!Arc::ptr_eq(&a.recipient_info, &b.recipient_info));
            }
            _ => panic!("expected cover letters"),
        }
    }
}
