//! Path aggregation over parsed XML documents.
//!
//! [`PathAggregator`] walks each document's element tree depth-first and
//! records every element path and attribute path it meets into a shared
//! [`CorpusStats`]. Counts for the document being walked go into a fresh
//! [`FileCounters`], which is folded into the corpus once the walk is done
//! to maintain the per-file maximum of every path.
//!
//! Two results depend on the order documents are scanned in: the sample of
//! a path is the first non-empty value met, and the max-per-file document is
//! the first one to reach the maximum. Scanning the same documents in the
//! same order always gives the same table.

use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, info, warn};

use crate::error::XmlShapeError;
use crate::query::options::{AttributeEntryPolicy, AttributeKeys};
use crate::source::SourceDocument;

use super::path::{attribute_key, attribute_name, element_name, element_text, join_path};
use super::path::ValueNormalizer;
use super::stats::{CorpusStats, FileCounters, PathKind, ScanResult, SkippedDocument};

/// Walks documents and accumulates path statistics.
#[derive(Debug, Clone, Default)]
pub struct PathAggregator {
    attribute_keys: AttributeKeys,
    entry_policy: AttributeEntryPolicy,
    normalizer: ValueNormalizer,
}

impl PathAggregator {
    /// Aggregator with value-folded attribute keys, Getty AAT collapsing,
    /// and attribute entries created on first sight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how attribute keys are built.
    pub fn attribute_keys(mut self, keys: AttributeKeys) -> Self {
        self.attribute_keys = keys;
        self
    }

    /// Set when new attribute entries are created.
    pub fn entry_policy(mut self, policy: AttributeEntryPolicy) -> Self {
        self.entry_policy = policy;
        self
    }

    /// Set the attribute value normalizer.
    pub fn normalizer(mut self, normalizer: ValueNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Record `node` and everything below it.
    ///
    /// `ancestor_path` is the path of the node's parent, empty for the root
    /// element.
    pub fn visit(
        &self,
        node: Node<'_, '_>,
        ancestor_path: &str,
        corpus: &mut CorpusStats,
        file: &mut FileCounters,
        file_id: &str,
    ) {
        let current_path = join_path(ancestor_path, element_name(&node));
        let owned_text = element_text(&node);
        let text = owned_text.as_deref();

        file.increment(&current_path);
        let entry = corpus.record(&current_path, PathKind::Element);
        if let Some(text) = text {
            entry.offer_sample(text, file_id);
        }

        for attr in node.attributes() {
            let name = attribute_name(&attr);
            let value = self.normalizer.normalize(attr.value());
            let attr_path = attribute_key(&current_path, &name, &value, self.attribute_keys);

            file.increment(&attr_path);
            let entry = match self.entry_policy {
                AttributeEntryPolicy::Always => Some(corpus.record(&attr_path, PathKind::Attribute)),
                AttributeEntryPolicy::RequireElementText if text.is_some() => {
                    Some(corpus.record(&attr_path, PathKind::Attribute))
                }
                AttributeEntryPolicy::RequireElementText => corpus.record_existing(&attr_path),
            };
            if let Some(entry) = entry {
                entry.offer_sample(attr.value().trim(), file_id);
            }
        }

        for child in node.children().filter(|n| n.is_element()) {
            self.visit(child, &current_path, corpus, file, file_id);
        }
    }

    /// Walk a whole parsed document and fold its counts into the corpus.
    ///
    /// Returns the document's own counters.
    pub fn scan_document(
        &self,
        doc: &Document<'_>,
        file_id: &str,
        corpus: &mut CorpusStats,
    ) -> FileCounters {
        let mut file = FileCounters::new();
        self.visit(doc.root_element(), "", corpus, &mut file, file_id);
        fold_file_into_corpus(&file, corpus, file_id);
        file
    }

    /// Scan a sequence of documents in order.
    ///
    /// Documents that cannot be read or parsed are logged, listed in
    /// [`ScanResult::skipped`], and otherwise ignored.
    pub fn scan_corpus<I>(&self, sources: I) -> ScanResult
    where
        I: IntoIterator<Item = SourceDocument>,
    {
        let mut result = ScanResult::new();

        for source in sources {
            match self.scan_source(source, &mut result.stats) {
                Ok(()) => result.document_count += 1,
                Err(skipped) => {
                    warn!(path = %skipped.path.display(), error = %skipped.message, "skipping document");
                    result.skipped.push(skipped);
                }
            }
        }

        info!(
            documents = result.document_count,
            skipped = result.skipped.len(),
            paths = result.stats.len(),
            "corpus scan complete"
        );

        result
    }

    fn scan_source(
        &self,
        source: SourceDocument,
        corpus: &mut CorpusStats,
    ) -> std::result::Result<(), SkippedDocument> {
        let text = source.content.map_err(|e| SkippedDocument {
            path: source.path.clone(),
            message: e.to_string(),
        })?;

        let doc = parse_document(&text).map_err(|e| {
            let err = XmlShapeError::Parse {
                path: source.path.clone(),
                message: e.to_string(),
            };
            SkippedDocument {
                path: source.path.clone(),
                message: err.to_string(),
            }
        })?;

        let file = self.scan_document(&doc, &source.id, corpus);
        debug!(document = %source.id, paths = file.len(), "scanned document");
        Ok(())
    }
}

/// Fold one document's counts into the corpus-wide per-file maxima.
///
/// A path's maximum only moves when this document's count is strictly
/// greater, so the first document to reach a maximum keeps it. Paths that
/// have no corpus entry (attributes held back by
/// [`AttributeEntryPolicy::RequireElementText`]) are ignored.
pub fn fold_file_into_corpus(file: &FileCounters, corpus: &mut CorpusStats, file_id: &str) {
    for (path, count) in file.iter() {
        if let Some(entry) = corpus.get_mut(path) {
            entry.stats.offer_file_count(count, file_id);
        }
    }
}

/// Parse XML text. Documents with a DTD are accepted.
pub fn parse_document(text: &str) -> std::result::Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(docs: &[(&str, &str)]) -> ScanResult {
        scan_with(PathAggregator::new(), docs)
    }

    fn scan_with(aggregator: PathAggregator, docs: &[(&str, &str)]) -> ScanResult {
        let sources = docs
            .iter()
            .map(|(id, xml)| SourceDocument::from_text(*id, *xml));
        aggregator.scan_corpus(sources)
    }

    #[test]
    fn test_single_document_counts() {
        let result = scan(&[("doc1", "<a><b>x</b><b>y</b></a>")]);
        let stats = &result.stats;

        let a = stats.get("a").unwrap();
        assert_eq!(a.stats.occurrences, 1);
        assert_eq!(a.stats.max_per_file, 1);
        assert_eq!(a.sample_value(), "N/A");

        let b = stats.get("a/b").unwrap();
        assert_eq!(b.stats.occurrences, 2);
        assert_eq!(b.stats.max_per_file, 2);
        assert_eq!(b.stats.max_file, "doc1");
        assert_eq!(b.sample_value(), "x");
        assert_eq!(b.sample_file(), "doc1");
        assert_eq!(result.document_count, 1);
    }

    #[test]
    fn test_max_per_file_across_documents() {
        let result = scan(&[("doc1", "<a><b/></a>"), ("doc2", "<a><b/><b/></a>")]);

        let b = result.stats.get("a/b").unwrap();
        assert_eq!(b.stats.occurrences, 3);
        assert_eq!(b.stats.max_per_file, 2);
        assert_eq!(b.stats.max_file, "doc2");
    }

    #[test]
    fn test_max_per_file_ties_keep_first_document() {
        let result = scan(&[("doc1", "<a><b/><b/></a>"), ("doc2", "<a><b/><b/></a>")]);
        assert_eq!(result.stats.get("a/b").unwrap().stats.max_file, "doc1");

        // Same documents, other order: attribution follows scan order.
        let result = scan(&[("doc2", "<a><b/><b/></a>"), ("doc1", "<a><b/><b/></a>")]);
        assert_eq!(result.stats.get("a/b").unwrap().stats.max_file, "doc2");
    }

    #[test]
    fn test_sample_is_first_non_empty_in_scan_order() {
        let docs = [
            ("doc1", "<a><b>  </b></a>"),
            ("doc2", "<a><b>second</b></a>"),
            ("doc3", "<a><b>third</b></a>"),
        ];
        let result = scan(&docs);
        let b = result.stats.get("a/b").unwrap();
        assert_eq!(b.sample_value(), "second");
        assert_eq!(b.sample_file(), "doc2");

        let reversed: Vec<_> = docs.iter().rev().cloned().collect();
        let result = scan(&reversed);
        assert_eq!(result.stats.get("a/b").unwrap().sample_value(), "third");
    }

    #[test]
    fn test_paths_are_positional() {
        let result = scan(&[("doc1", "<a><title/><b><title/></b></a>")]);

        assert!(result.stats.contains("a/title"));
        assert!(result.stats.contains("a/b/title"));
        assert_eq!(result.stats.get("a/title").unwrap().stats.occurrences, 1);
    }

    #[test]
    fn test_sample_text_around_comments() {
        let result = scan(&[(
            "d",
            "<a><b><!-- note -->Title</b><c>foo<!--x-->bar</c><e><?render inline?> value </e></a>",
        )]);
        let stats = &result.stats;

        assert_eq!(stats.get("a/b").unwrap().sample_value(), "Title");
        assert_eq!(stats.get("a/c").unwrap().sample_value(), "foobar");
        assert_eq!(stats.get("a/e").unwrap().sample_value(), "value");
        assert_eq!(stats.get("a").unwrap().sample_value(), "N/A");
    }

    #[test]
    fn test_legacy_policy_sees_text_after_comment() {
        let aggregator =
            PathAggregator::new().entry_policy(AttributeEntryPolicy::RequireElementText);
        let result = scan_with(aggregator, &[("d", r#"<a><b type="t"><!-- c -->text</b></a>"#)]);

        let attr = result.stats.get("a/b/@type/t").unwrap();
        assert_eq!(attr.stats.occurrences, 1);
        assert_eq!(attr.sample_value(), "t");
    }

    #[test]
    fn test_namespaces_are_stripped_from_tags() {
        let xml = r#"<mods:mods xmlns:mods="http://www.loc.gov/mods/v3">
            <mods:titleInfo><mods:title>Hello</mods:title></mods:titleInfo>
        </mods:mods>"#;
        let result = scan(&[("doc1", xml)]);

        assert_eq!(
            result.stats.get("mods/titleInfo/title").unwrap().sample_value(),
            "Hello"
        );
    }

    #[test]
    fn test_attribute_values_fold_into_keys() {
        let xml = r#"<mods>
            <titleInfo type="alternative"><title>Alt</title></titleInfo>
            <titleInfo type="translated"><title>Trans</title></titleInfo>
            <titleInfo type="alternative"><title>Alt 2</title></titleInfo>
        </mods>"#;
        let result = scan(&[("doc1", xml)]);

        let alt = result.stats.get("mods/titleInfo/@type/alternative").unwrap();
        assert_eq!(alt.kind, PathKind::Attribute);
        assert_eq!(alt.stats.occurrences, 2);
        assert_eq!(alt.stats.max_per_file, 2);
        assert_eq!(alt.sample_value(), "alternative");
        assert!(result.stats.contains("mods/titleInfo/@type/translated"));
    }

    #[test]
    fn test_named_attribute_keys() {
        let xml = r#"<mods><titleInfo type="alternative"/><titleInfo type="translated"/></mods>"#;
        let aggregator = PathAggregator::new().attribute_keys(AttributeKeys::Named);
        let result = scan_with(aggregator, &[("doc1", xml)]);

        let attr = result.stats.get("mods/titleInfo/@type").unwrap();
        assert_eq!(attr.stats.occurrences, 2);
        assert_eq!(attr.sample_value(), "alternative");
    }

    #[test]
    fn test_vocabulary_uris_collapse_across_documents() {
        let doc1 = r#"<mods><genre valueURI="http://vocab.getty.edu/page/aat/300007501">x</genre></mods>"#;
        let doc2 = r#"<mods><genre valueURI="http://vocab.getty.edu/page/aat/300264578">y</genre></mods>"#;
        let result = scan(&[("doc1", doc1), ("doc2", doc2)]);

        let key = "mods/genre/@valueURI/http://vocab.getty.edu/page/aat/*";
        let entry = result.stats.get(key).unwrap();
        assert_eq!(entry.stats.occurrences, 2);
        assert_eq!(entry.stats.max_per_file, 1);
        assert_eq!(entry.stats.max_file, "doc1");
        // The sample keeps the raw value.
        assert_eq!(
            entry.sample_value(),
            "http://vocab.getty.edu/page/aat/300007501"
        );
        assert_eq!(
            result
                .stats
                .iter()
                .filter(|(_, e)| e.kind == PathKind::Attribute)
                .count(),
            1
        );
    }

    #[test]
    fn test_legacy_policy_holds_back_attributes_on_empty_elements() {
        let aggregator =
            PathAggregator::new().entry_policy(AttributeEntryPolicy::RequireElementText);
        let result = scan_with(
            aggregator,
            &[
                ("doc1", r#"<a><b type="t"/><b type="t"/></a>"#),
                ("doc2", r#"<a><b type="t">text</b></a>"#),
                ("doc3", r#"<a><b type="t"/></a>"#),
            ],
        );

        let attr = result.stats.get("a/b/@type/t").unwrap();
        // doc1's occurrences never made it into the corpus; doc2 created the
        // entry and doc3 incremented it.
        assert_eq!(attr.stats.occurrences, 2);
        assert_eq!(attr.stats.max_per_file, 1);
        assert_eq!(attr.stats.max_file, "doc2");
        assert!(attr.stats.occurrences >= attr.stats.max_per_file);
    }

    #[test]
    fn test_always_policy_records_attributes_on_empty_elements() {
        let result = scan(&[("doc1", r#"<a><b type="t"/><b type="t"/></a>"#)]);

        let attr = result.stats.get("a/b/@type/t").unwrap();
        assert_eq!(attr.stats.occurrences, 2);
        assert_eq!(attr.stats.max_file, "doc1");
    }

    #[test]
    fn test_malformed_document_is_skipped() {
        let good = [("doc1", "<a><b>x</b></a>"), ("doc3", "<a><b/><c/></a>")];
        let with_bad = [good[0], ("doc2", "<a><b></a>"), good[1]];

        let clean = scan(&good);
        let mixed = scan(&with_bad);

        assert_eq!(mixed.document_count, 2);
        assert_eq!(mixed.skipped.len(), 1);
        assert_eq!(mixed.skipped[0].path.to_string_lossy(), "doc2.xml");
        assert!(mixed.skipped[0].message.contains("doc2.xml"));
        assert_eq!(clean.stats, mixed.stats);
    }

    #[test]
    fn test_rescan_is_identical() {
        let docs = [
            ("doc1", r#"<a x="1"><b>x</b></a>"#),
            ("doc2", r#"<a x="2"><b/><b>y</b><c/></a>"#),
        ];
        let first = scan(&docs);
        let second = scan(&docs);

        assert_eq!(first.stats, second.stats);
        let first_keys: Vec<&str> = first.stats.iter().map(|(k, _)| k).collect();
        assert_eq!(first_keys, vec!["a", "a/@x/1", "a/b", "a/@x/2", "a/c"]);
    }

    #[test]
    fn test_occurrences_never_below_max_per_file() {
        let result = scan(&[
            ("doc1", r#"<r><p k="v"/><p k="v"/><p/></r>"#),
            ("doc2", r#"<r><p/></r>"#),
            ("doc3", r#"<r><p k="v"/><q/><q/><q/></r>"#),
        ]);

        for (path, entry) in result.stats.iter() {
            assert!(
                entry.stats.occurrences >= entry.stats.max_per_file,
                "{} breaks occurrences >= max_per_file",
                path
            );
            assert!(entry.stats.max_per_file >= 1);
            assert!(!entry.stats.max_file.is_empty());
        }
    }

    #[test]
    fn test_visit_and_fold_directly() {
        let aggregator = PathAggregator::new();
        let mut corpus = CorpusStats::new();
        let doc = parse_document("<a><b/><b/></a>").unwrap();

        let mut file = FileCounters::new();
        aggregator.visit(doc.root_element(), "", &mut corpus, &mut file, "doc1");
        assert_eq!(file.get("a/b"), 2);
        assert_eq!(corpus.get("a/b").unwrap().stats.max_per_file, 0);

        fold_file_into_corpus(&file, &mut corpus, "doc1");
        assert_eq!(corpus.get("a/b").unwrap().stats.max_per_file, 2);
        assert_eq!(corpus.get("a/b").unwrap().stats.max_file, "doc1");
    }

    #[test]
    fn test_unreadable_source_is_skipped() {
        let missing = SourceDocument::read("/nonexistent/dir/gone.xml");
        let result = PathAggregator::new().scan_corpus(vec![missing]);

        assert_eq!(result.document_count, 0);
        assert_eq!(result.skipped.len(), 1);
        assert!(result.stats.is_empty());
    }
}
