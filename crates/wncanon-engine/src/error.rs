use wncanon_model::SenseRelType;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fatal conditions. Any of these aborts the batch before output is written.
#[derive(Debug, thiserror::Error)]
pub enum CanonError {
    #[error("{rel_type} relation on `{from_sense}` targets unknown sense key `{key}`")]
    MissingSenseKey {
        from_sense: String,
        key: String,
        rel_type: SenseRelType,
    },

    #[error("lemma `{lemma}` is not a recorded member of synset `{synset}`")]
    LemmaNotInMembers { lemma: String, synset: String },

    #[error("`{from}` refers to unknown synset `{synset}`")]
    MissingSynset { from: String, synset: String },

    #[error("sense key `{key}` is shared by `{first}` and `{second}`")]
    DuplicateSenseKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("`{from_sense}` refers to `{target}`, which is not a known sense")]
    UnresolvedSenseTarget { from_sense: String, target: String },

    #[error("failed to load snapshot for `{lex_name}`")]
    Snapshot {
        lex_name: String,
        #[source]
        source: BoxError,
    },
}

pub type Result<T> = std::result::Result<T, CanonError>;
