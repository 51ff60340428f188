use std::collections::HashMap;

use crate::{ClassifierError, DialogueEntry, GenderClassifier};

/// Attach a predicted gender label to every entry, in place.
///
/// Each distinct speaker name is classified once; repeated names reuse the
/// first prediction. Order, count, `name` and `dialogue` are left untouched.
/// Fails on the first classifier error.
pub fn annotate_genders(
    classifier: &dyn GenderClassifier,
    mut entries: Vec<DialogueEntry>,
) -> Result<Vec<DialogueEntry>, ClassifierError> {
    let mut predictions: HashMap<String, String> = HashMap::new();

    for entry in entries.iter_mut() {
        let label = match predictions.get(&entry.name) {
            Some(label) => label.clone(),
            None => {
                let label = classifier.classify(&entry.name)?;
                predictions.insert(entry.name.clone(), label.clone());
                label
            }
        };
        entry.predicted_gender = Some(label);
    }

    tracing::debug!(
        entries = entries.len(),
        speakers = predictions.len(),
        "annotated dialogue entries"
    );

    Ok(entries)
}
