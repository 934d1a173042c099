//! Relation semantics table.
//!
//! Sense relations and synset relations use two separate closed vocabularies.
//! Each kind knows its WN-LMF tag and its inverse kind:
//!
//! - `Some(other)`: an edge of this kind from A to B implies `other` from B to A
//! - `Some(self)`: the kind is symmetric
//! - `None`: no inverse is defined and closure never adds one
//!
//! The inverse tables are exhaustive `match`es so that adding a kind forces a
//! decision about its inverse.

use crate::UnknownTag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! relation_kinds {
    (
        $(#[$meta:meta])*
        $name:ident, $vocabulary:literal {
            $($variant:ident => $tag:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every kind, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The WN-LMF `relType` attribute value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok($name::$variant),)+
                    _ => Err(UnknownTag::new($vocabulary, s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

relation_kinds! {
    /// Kinds of lexical (sense-to-sense) relations.
    SenseRelType, "sense relation" {
        Antonym => "antonym",
        Also => "also",
        Participle => "participle",
        Pertainym => "pertainym",
        Derivation => "derivation",
        DomainTopic => "domain_topic",
        HasDomainTopic => "has_domain_topic",
        DomainRegion => "domain_region",
        HasDomainRegion => "has_domain_region",
        Exemplifies => "exemplifies",
        IsExemplifiedBy => "is_exemplified_by",
        Similar => "similar",
        Other => "other",
        Feminine => "feminine",
        HasFeminine => "has_feminine",
        Masculine => "masculine",
        HasMasculine => "has_masculine",
        Young => "young",
        HasYoung => "has_young",
        Diminutive => "diminutive",
        HasDiminutive => "has_diminutive",
        Augmentative => "augmentative",
        HasAugmentative => "has_augmentative",
        AntoGradable => "anto_gradable",
        AntoSimple => "anto_simple",
        AntoConverse => "anto_converse",
        SimpleAspectIp => "simple_aspect_ip",
        SecondaryAspectIp => "secondary_aspect_ip",
        SimpleAspectPi => "simple_aspect_pi",
        SecondaryAspectPi => "secondary_aspect_pi",
    }
}

relation_kinds! {
    /// Kinds of conceptual (synset-to-synset) relations.
    SynsetRelType, "synset relation" {
        Agent => "agent",
        Also => "also",
        Attribute => "attribute",
        BeInState => "be_in_state",
        Causes => "causes",
        ClassifiedBy => "classified_by",
        Classifies => "classifies",
        CoAgentInstrument => "co_agent_instrument",
        CoAgentPatient => "co_agent_patient",
        CoAgentResult => "co_agent_result",
        CoInstrumentAgent => "co_instrument_agent",
        CoInstrumentPatient => "co_instrument_patient",
        CoInstrumentResult => "co_instrument_result",
        CoPatientAgent => "co_patient_agent",
        CoPatientInstrument => "co_patient_instrument",
        CoResultAgent => "co_result_agent",
        CoResultInstrument => "co_result_instrument",
        CoRole => "co_role",
        Direction => "direction",
        DomainRegion => "domain_region",
        DomainTopic => "domain_topic",
        Exemplifies => "exemplifies",
        Entails => "entails",
        EqSynonym => "eq_synonym",
        HasDomainRegion => "has_domain_region",
        HasDomainTopic => "has_domain_topic",
        IsExemplifiedBy => "is_exemplified_by",
        HoloLocation => "holo_location",
        HoloMember => "holo_member",
        HoloPart => "holo_part",
        HoloPortion => "holo_portion",
        HoloSubstance => "holo_substance",
        Holonym => "holonym",
        Hypernym => "hypernym",
        Hyponym => "hyponym",
        InManner => "in_manner",
        InstanceHypernym => "instance_hypernym",
        InstanceHyponym => "instance_hyponym",
        Instrument => "instrument",
        Involved => "involved",
        InvolvedAgent => "involved_agent",
        InvolvedDirection => "involved_direction",
        InvolvedInstrument => "involved_instrument",
        InvolvedLocation => "involved_location",
        InvolvedPatient => "involved_patient",
        InvolvedResult => "involved_result",
        InvolvedSourceDirection => "involved_source_direction",
        InvolvedTargetDirection => "involved_target_direction",
        IsCausedBy => "is_caused_by",
        IsEntailedBy => "is_entailed_by",
        Location => "location",
        MannerOf => "manner_of",
        MeroLocation => "mero_location",
        MeroMember => "mero_member",
        MeroPart => "mero_part",
        MeroPortion => "mero_portion",
        MeroSubstance => "mero_substance",
        Meronym => "meronym",
        Similar => "similar",
        Other => "other",
        Patient => "patient",
        RestrictedBy => "restricted_by",
        Restricts => "restricts",
        Result => "result",
        Role => "role",
        SourceDirection => "source_direction",
        StateOf => "state_of",
        TargetDirection => "target_direction",
        Subevent => "subevent",
        IsSubeventOf => "is_subevent_of",
        Antonym => "antonym",
        Feminine => "feminine",
        HasFeminine => "has_feminine",
        Masculine => "masculine",
        HasMasculine => "has_masculine",
        Young => "young",
        HasYoung => "has_young",
        Diminutive => "diminutive",
        HasDiminutive => "has_diminutive",
        Augmentative => "augmentative",
        HasAugmentative => "has_augmentative",
        AntoGradable => "anto_gradable",
        AntoSimple => "anto_simple",
        AntoConverse => "anto_converse",
        IrSynonym => "ir_synonym",
    }
}

impl SenseRelType {
    pub fn inverse(&self) -> Option<SenseRelType> {
        use SenseRelType::*;
        match self {
            Antonym => Some(Antonym),
            Derivation => Some(Derivation),
            Similar => Some(Similar),
            DomainTopic => Some(HasDomainTopic),
            HasDomainTopic => Some(DomainTopic),
            DomainRegion => Some(HasDomainRegion),
            HasDomainRegion => Some(DomainRegion),
            Exemplifies => Some(IsExemplifiedBy),
            IsExemplifiedBy => Some(Exemplifies),
            Feminine => Some(HasFeminine),
            HasFeminine => Some(Feminine),
            Masculine => Some(HasMasculine),
            HasMasculine => Some(Masculine),
            Young => Some(HasYoung),
            HasYoung => Some(Young),
            Diminutive => Some(HasDiminutive),
            HasDiminutive => Some(Diminutive),
            Augmentative => Some(HasAugmentative),
            HasAugmentative => Some(Augmentative),
            AntoGradable => Some(AntoGradable),
            AntoSimple => Some(AntoSimple),
            AntoConverse => Some(AntoConverse),
            SimpleAspectIp => Some(SimpleAspectPi),
            SimpleAspectPi => Some(SimpleAspectIp),
            SecondaryAspectIp => Some(SecondaryAspectPi),
            SecondaryAspectPi => Some(SecondaryAspectIp),
            Also | Participle | Pertainym | Other => None,
        }
    }

    /// The inverse kind, if it differs from this one.
    pub fn distinct_inverse(&self) -> Option<SenseRelType> {
        self.inverse().filter(|inv| inv != self)
    }
}

impl SynsetRelType {
    pub fn inverse(&self) -> Option<SynsetRelType> {
        use SynsetRelType::*;
        match self {
            Hypernym => Some(Hyponym),
            Hyponym => Some(Hypernym),
            InstanceHypernym => Some(InstanceHyponym),
            InstanceHyponym => Some(InstanceHypernym),
            Meronym => Some(Holonym),
            Holonym => Some(Meronym),
            MeroLocation => Some(HoloLocation),
            HoloLocation => Some(MeroLocation),
            MeroMember => Some(HoloMember),
            HoloMember => Some(MeroMember),
            MeroPart => Some(HoloPart),
            HoloPart => Some(MeroPart),
            MeroPortion => Some(HoloPortion),
            HoloPortion => Some(MeroPortion),
            MeroSubstance => Some(HoloSubstance),
            HoloSubstance => Some(MeroSubstance),
            BeInState => Some(StateOf),
            StateOf => Some(BeInState),
            Causes => Some(IsCausedBy),
            IsCausedBy => Some(Causes),
            Subevent => Some(IsSubeventOf),
            IsSubeventOf => Some(Subevent),
            MannerOf => Some(InManner),
            InManner => Some(MannerOf),
            Restricts => Some(RestrictedBy),
            RestrictedBy => Some(Restricts),
            Classifies => Some(ClassifiedBy),
            ClassifiedBy => Some(Classifies),
            Entails => Some(IsEntailedBy),
            IsEntailedBy => Some(Entails),
            DomainTopic => Some(HasDomainTopic),
            HasDomainTopic => Some(DomainTopic),
            DomainRegion => Some(HasDomainRegion),
            HasDomainRegion => Some(DomainRegion),
            Exemplifies => Some(IsExemplifiedBy),
            IsExemplifiedBy => Some(Exemplifies),
            Role => Some(Involved),
            Involved => Some(Role),
            Agent => Some(InvolvedAgent),
            InvolvedAgent => Some(Agent),
            Patient => Some(InvolvedPatient),
            InvolvedPatient => Some(Patient),
            Result => Some(InvolvedResult),
            InvolvedResult => Some(Result),
            Instrument => Some(InvolvedInstrument),
            InvolvedInstrument => Some(Instrument),
            Location => Some(InvolvedLocation),
            InvolvedLocation => Some(Location),
            Direction => Some(InvolvedDirection),
            InvolvedDirection => Some(Direction),
            TargetDirection => Some(InvolvedTargetDirection),
            InvolvedTargetDirection => Some(TargetDirection),
            SourceDirection => Some(InvolvedSourceDirection),
            InvolvedSourceDirection => Some(SourceDirection),
            CoAgentPatient => Some(CoPatientAgent),
            CoPatientAgent => Some(CoAgentPatient),
            CoAgentInstrument => Some(CoInstrumentAgent),
            CoInstrumentAgent => Some(CoAgentInstrument),
            CoAgentResult => Some(CoResultAgent),
            CoResultAgent => Some(CoAgentResult),
            CoPatientInstrument => Some(CoInstrumentPatient),
            CoInstrumentPatient => Some(CoPatientInstrument),
            CoResultInstrument => Some(CoInstrumentResult),
            CoInstrumentResult => Some(CoResultInstrument),
            Feminine => Some(HasFeminine),
            HasFeminine => Some(Feminine),
            Masculine => Some(HasMasculine),
            HasMasculine => Some(Masculine),
            Young => Some(HasYoung),
            HasYoung => Some(Young),
            Diminutive => Some(HasDiminutive),
            HasDiminutive => Some(Diminutive),
            Augmentative => Some(HasAugmentative),
            HasAugmentative => Some(Augmentative),
            Attribute => Some(Attribute),
            Antonym => Some(Antonym),
            EqSynonym => Some(EqSynonym),
            IrSynonym => Some(IrSynonym),
            Similar => Some(Similar),
            CoRole => Some(CoRole),
            AntoGradable => Some(AntoGradable),
            AntoSimple => Some(AntoSimple),
            AntoConverse => Some(AntoConverse),
            Also | Other => None,
        }
    }

    /// The inverse kind, if it differs from this one.
    pub fn distinct_inverse(&self) -> Option<SynsetRelType> {
        self.inverse().filter(|inv| inv != self)
    }
}
