use quick_xml::events::attributes::AttrError;
use wncanon_model::UnknownTag;

#[derive(Debug, thiserror::Error)]
pub enum LmfError {
    #[error("malformed XML near byte {position}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute near byte {position}")]
    Attribute {
        position: usize,
        #[source]
        source: AttrError,
    },

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> appears outside of <{parent}>")]
    Misplaced {
        element: &'static str,
        parent: &'static str,
    },

    #[error("<{element}> has an invalid `n` value `{value}`")]
    InvalidRank { element: &'static str, value: String },

    #[error(transparent)]
    UnknownTag(#[from] UnknownTag),

    #[error("no <Lexicon> element found")]
    NoLexicon,

    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}
