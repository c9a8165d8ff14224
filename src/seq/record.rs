// A record for sequences, consisting of some description and a raw sequence. Meant to be
// format-agnostic - should work for FastA, Stockholm, Clustal, etc - though in the last cases it
// won't contain annotations.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    pub header: String,
    pub sequence: String,
}
