use crate::labs::Laboratory;
use crate::models::lines::{DeleteLine, DeleteReason, VariantLine};

///
/// Everything one laboratory submits in a release: creates/updates and deletes.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabSubmission {
    /// ClinVar submitter name.
    pub lab: String,
    pub short_code: String,
    pub variants: Vec<VariantLine>,
    pub deletes: Vec<DeleteLine>,
}

impl LabSubmission {
    pub fn new(lab: &Laboratory) -> Self {
        LabSubmission {
            lab: lab.name.clone(),
            short_code: lab.short_code.clone(),
            variants: Vec::new(),
            deletes: Vec::new(),
        }
    }

    /// Lines that update an existing accession.
    pub fn updates(&self) -> impl Iterator<Item = &VariantLine> {
        self.variants.iter().filter(|line| line.is_update())
    }

    pub fn deletes_with(&self, reason: DeleteReason) -> impl Iterator<Item = &DeleteLine> {
        self.deletes.iter().filter(move |line| line.reason == reason)
    }
}
