use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};

use scvsync_core::consts::SHARED_SUBMISSION_STUDY;
use scvsync_core::models::AssertionRecord;
use scvsync_core::utils::get_dynamic_reader;

use crate::error::{ExtractError, Result};

const CLINVAR_ASSERTION: &[u8] = b"ClinVarAssertion";
const CLINVAR_ACCESSION: &[u8] = b"ClinVarAccession";
const CLINVAR_SUBMISSION_ID: &[u8] = b"ClinVarSubmissionID";
const CLINICAL_SIGNIFICANCE: &[u8] = b"ClinicalSignificance";
const STUDY_NAME: &[u8] = b"StudyName";
const ELEMENT_VALUE: &[u8] = b"ElementValue";
const DESCRIPTION: &[u8] = b"Description";
const ATTRIBUTE: &[u8] = b"Attribute";

const SCV_TYPE: &str = "SCV";
const HGVS_TYPE: &str = "HGVS";

///
/// Counters of what the extractor saw, for reporting.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    /// `ClinVarAssertion` elements seen.
    pub assertions: usize,
    /// Assertions yielded.
    pub kept: usize,
    /// Assertions of some other study.
    pub other_study: usize,
    /// Shared-submission assertions without accession or submitter.
    pub incomplete: usize,
}

/// Element whose text is being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    StudyName,
    Gene,
    Classification,
    Hgvs,
}

impl Capture {
    fn element(&self) -> &'static [u8] {
        match self {
            Capture::StudyName => STUDY_NAME,
            Capture::Gene => ELEMENT_VALUE,
            Capture::Classification => DESCRIPTION,
            Capture::Hgvs => ATTRIBUTE,
        }
    }
}

#[derive(Debug, Default)]
struct PendingAssertion {
    accession_id: Option<String>,
    submitter: Option<String>,
    gene: Option<String>,
    classification: Option<String>,
    cdna_notation: Option<String>,
    shared_study: bool,
}

enum Finished {
    Kept(AssertionRecord),
    OtherStudy,
    Incomplete,
}

impl PendingAssertion {
    fn finish(self) -> Finished {
        if !self.shared_study {
            return Finished::OtherStudy;
        }

        let accession_id = self.accession_id.unwrap_or_default();
        let submitting_lab = self.submitter.unwrap_or_default();
        if accession_id.is_empty() || submitting_lab.is_empty() {
            return Finished::Incomplete;
        }

        Finished::Kept(AssertionRecord {
            cdna_notation: self.cdna_notation.unwrap_or_default(),
            accession_id,
            gene: self.gene.unwrap_or_default(),
            classification: self.classification.unwrap_or_default(),
            submitting_lab,
        })
    }
}

#[derive(Debug, Default)]
struct ParseState {
    pending: Option<PendingAssertion>,
    capture: Option<Capture>,
    in_clinical_significance: bool,
    text: String,
}

impl ParseState {
    fn start(&mut self, e: &BytesStart) {
        let name = e.name();
        if name.as_ref() == CLINVAR_ASSERTION {
            self.pending = Some(PendingAssertion::default());
            self.capture = None;
            self.in_clinical_significance = false;
            return;
        }

        if self.pending.is_none() {
            return;
        }

        match name.as_ref() {
            CLINICAL_SIGNIFICANCE => self.in_clinical_significance = true,
            STUDY_NAME => self.begin_capture(Capture::StudyName),
            ELEMENT_VALUE => self.begin_capture(Capture::Gene),
            DESCRIPTION if self.in_clinical_significance => {
                self.begin_capture(Capture::Classification)
            }
            ATTRIBUTE if attribute(e, b"Type").as_deref() == Some(HGVS_TYPE) => {
                self.begin_capture(Capture::Hgvs)
            }
            _ => self.attributes_only(e),
        }
    }

    ///
    /// Elements that carry their data in attributes; these are usually self-closing.
    ///
    fn attributes_only(&mut self, e: &BytesStart) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        match e.name().as_ref() {
            CLINVAR_SUBMISSION_ID => {
                if let Some(submitter) = attribute(e, b"submitter") {
                    pending.submitter = Some(submitter);
                }
            }
            CLINVAR_ACCESSION if attribute(e, b"Type").as_deref() == Some(SCV_TYPE) => {
                if let Some(acc) = attribute(e, b"Acc") {
                    pending.accession_id = Some(acc);
                }
            }
            _ => {}
        }
    }

    fn begin_capture(&mut self, capture: Capture) {
        self.capture = Some(capture);
        self.text.clear();
    }

    fn text(&mut self, text: &str) {
        if self.capture.is_some() {
            self.text.push_str(text);
        }
    }

    ///
    /// Handle a closing tag. Returns the finished assertion when `ClinVarAssertion` closes.
    ///
    fn end(&mut self, name: &[u8]) -> Option<PendingAssertion> {
        if let Some(capture) = self.capture {
            if capture.element() == name {
                self.end_capture(capture);
                return None;
            }
        }

        match name {
            CLINICAL_SIGNIFICANCE => {
                self.in_clinical_significance = false;
                None
            }
            CLINVAR_ASSERTION => {
                self.capture = None;
                self.in_clinical_significance = false;
                self.pending.take()
            }
            _ => None,
        }
    }

    fn end_capture(&mut self, capture: Capture) {
        self.capture = None;
        let value = self.text.trim().to_string();
        self.text.clear();

        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        // first occurrence wins for every captured field
        match capture {
            Capture::StudyName => {
                if value == SHARED_SUBMISSION_STUDY {
                    pending.shared_study = true;
                }
            }
            Capture::Gene => {
                pending.gene.get_or_insert(value);
            }
            Capture::Classification => {
                pending.classification.get_or_insert(value);
            }
            Capture::Hgvs => {
                pending.cdna_notation.get_or_insert(value);
            }
        }
    }
}

fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            // unknown entities are kept verbatim
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}

///
/// Text of a character or entity reference; unknown entities are kept verbatim.
///
fn reference_text(e: &BytesRef) -> quick_xml::Result<String> {
    if let Some(ch) = e.resolve_char_ref()? {
        return Ok(ch.to_string());
    }
    let name = e.decode()?;
    Ok(match resolve_predefined_entity(&name) {
        Some(entity) => entity.to_string(),
        None => format!("&{name};"),
    })
}

fn malformed(position: u64, err: impl std::fmt::Display) -> ExtractError {
    ExtractError::Xml {
        position,
        message: err.to_string(),
    }
}

///
/// Lazy iterator over the shared-submission assertions of a ClinVar XML document.
///
/// Yields an error once and then stops if the document turns out to be malformed.
///
pub struct AssertionExtractor<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    state: ParseState,
    stats: ExtractStats,
    finished: bool,
}

impl AssertionExtractor<BufReader<Box<dyn Read>>> {
    ///
    /// Open a ClinVar XML release, gzip'd or not.
    ///
    /// # Arguments
    /// - path: path to the XML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path).map_err(|source| ExtractError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(AssertionExtractor::new(reader))
    }
}

impl<'a> AssertionExtractor<&'a [u8]> {
    pub fn from_xml_str(xml: &'a str) -> Self {
        AssertionExtractor::new(xml.as_bytes())
    }
}

impl<R: BufRead> AssertionExtractor<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(false);

        AssertionExtractor {
            reader,
            buf: Vec::new(),
            state: ParseState::default(),
            stats: ExtractStats::default(),
            finished: false,
        }
    }

    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    fn record_finished(&mut self, pending: PendingAssertion) -> Option<AssertionRecord> {
        self.stats.assertions += 1;
        match pending.finish() {
            Finished::Kept(record) => {
                self.stats.kept += 1;
                Some(record)
            }
            Finished::OtherStudy => {
                self.stats.other_study += 1;
                None
            }
            Finished::Incomplete => {
                self.stats.incomplete += 1;
                log::debug!("Skipping shared-submission assertion without accession or submitter");
                None
            }
        }
    }
}

impl<R: BufRead> Iterator for AssertionExtractor<R> {
    type Item = Result<AssertionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.buf.clear();
            let finished_assertion = match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(ref e)) => {
                    self.state.start(e);
                    None
                }
                Ok(Event::Empty(ref e)) => {
                    self.state.attributes_only(e);
                    None
                }
                Ok(Event::Text(ref e)) => match e.decode() {
                    Ok(text) => {
                        self.state.text(&text);
                        None
                    }
                    Err(err) => {
                        self.finished = true;
                        return Some(Err(malformed(self.reader.buffer_position(), err)));
                    }
                },
                Ok(Event::CData(ref e)) => match e.decode() {
                    Ok(text) => {
                        self.state.text(&text);
                        None
                    }
                    Err(err) => {
                        self.finished = true;
                        return Some(Err(malformed(self.reader.buffer_position(), err)));
                    }
                },
                Ok(Event::GeneralRef(ref e)) => match reference_text(e) {
                    Ok(text) => {
                        self.state.text(&text);
                        None
                    }
                    Err(err) => {
                        self.finished = true;
                        return Some(Err(malformed(self.reader.buffer_position(), err)));
                    }
                },
                Ok(Event::End(ref e)) => self.state.end(e.name().as_ref()),
                Ok(Event::Eof) => {
                    self.finished = true;
                    log::info!(
                        "Extracted {} of {} assertions ({} other study, {} incomplete)",
                        self.stats.kept,
                        self.stats.assertions,
                        self.stats.other_study,
                        self.stats.incomplete
                    );
                    return None;
                }
                Ok(_) => None,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(malformed(self.reader.buffer_position(), e)));
                }
            };

            if let Some(pending) = finished_assertion {
                if let Some(record) = self.record_finished(pending) {
                    return Some(Ok(record));
                }
            }
        }
    }
}

///
/// Collect every shared-submission assertion of a ClinVar XML file.
///
pub fn extract_assertions(path: &Path) -> Result<Vec<AssertionRecord>> {
    AssertionExtractor::from_path(path)?.collect()
}
