//! MEDLINE field tags understood by the record parsers.
//!
//! The set is closed: tags that are not listed here are skipped while parsing.
//! See <https://www.nlm.nih.gov/bsd/mms/medlineelements.html> for the full
//! element reference.

/// A MEDLINE field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// AB - Abstract
    Abstract,
    /// AD - Affiliation
    Affiliation,
    /// AID - Article identifier
    ArticleIdentifier,
    /// AU - Author
    Author,
    /// AUID - Author identifier
    AuthorIdentifier,
    /// CI - Copyright information
    CopyrightInformation,
    /// CIN - Comment in
    CommentIn,
    /// CN - Corporate author
    CorporateAuthor,
    /// COIS - Conflict of interest statement
    ConflictOfInterest,
    /// CON - Comment on
    CommentOn,
    /// CRDT - Create date
    CreateDate,
    /// DCOM - Date completed
    DateCompleted,
    /// DEP - Date of electronic publication
    ElectronicPublicationDate,
    /// DP - Date of publication
    PublicationDate,
    /// EDAT - Entrez date
    EntrezDate,
    /// EIN - Erratum in
    ErratumIn,
    /// FAU - Full author name
    FullAuthorName,
    /// GN - General note
    GeneralNote,
    /// GR - Grant number
    GrantNumber,
    /// GS - Gene symbol
    GeneSymbol,
    /// IP - Issue
    Issue,
    /// IS - ISSN
    Issn,
    /// JID - NLM unique ID
    NlmUniqueId,
    /// JT - Full journal title
    FullJournalTitle,
    /// LA - Language
    Language,
    /// LID - Location identifier
    LocationId,
    /// LR - Date last revised
    DateLastRevised,
    /// MH - MeSH heading
    MeshTerms,
    /// MHDA - MeSH date
    MeshDate,
    /// OT - Other term
    OtherTerm,
    /// OTO - Other term owner
    OtherTermOwner,
    /// OWN - Owner
    Owner,
    /// PG - Pagination
    Pagination,
    /// PHST - Publication history status
    PublicationHistoryStatus,
    /// PL - Place of publication
    PlaceOfPublication,
    /// PMC - PubMed Central identifier
    PubmedCentralIdentifier,
    /// PMCR - PubMed Central release
    PubmedCentralRelease,
    /// PMID - PubMed unique identifier
    PubmedUniqueIdentifier,
    /// PST - Publication status
    PublicationStatus,
    /// PT - Publication type
    PublicationType,
    /// RN - Registry number / EC number
    RegistryNumber,
    /// SB - Subset
    Subset,
    /// SI - Secondary source ID
    SecondarySourceId,
    /// SO - Source
    Source,
    /// STAT - Status
    Status,
    /// TA - Journal title abbreviation
    JournalTitleAbbreviation,
    /// TI - Title
    Title,
    /// TT - Transliterated title
    TransliteratedTitle,
    /// VI - Volume
    Volume,
}

impl Tag {
    /// Every known tag, in declaration order.
    pub const ALL: &'static [Tag] = &[
        Tag::Abstract,
        Tag::Affiliation,
        Tag::ArticleIdentifier,
        Tag::Author,
        Tag::AuthorIdentifier,
        Tag::CopyrightInformation,
        Tag::CommentIn,
        Tag::CorporateAuthor,
        Tag::ConflictOfInterest,
        Tag::CommentOn,
        Tag::CreateDate,
        Tag::DateCompleted,
        Tag::ElectronicPublicationDate,
        Tag::PublicationDate,
        Tag::EntrezDate,
        Tag::ErratumIn,
        Tag::FullAuthorName,
        Tag::GeneralNote,
        Tag::GrantNumber,
        Tag::GeneSymbol,
        Tag::Issue,
        Tag::Issn,
        Tag::NlmUniqueId,
        Tag::FullJournalTitle,
        Tag::Language,
        Tag::LocationId,
        Tag::DateLastRevised,
        Tag::MeshTerms,
        Tag::MeshDate,
        Tag::OtherTerm,
        Tag::OtherTermOwner,
        Tag::Owner,
        Tag::Pagination,
        Tag::PublicationHistoryStatus,
        Tag::PlaceOfPublication,
        Tag::PubmedCentralIdentifier,
        Tag::PubmedCentralRelease,
        Tag::PubmedUniqueIdentifier,
        Tag::PublicationStatus,
        Tag::PublicationType,
        Tag::RegistryNumber,
        Tag::Subset,
        Tag::SecondarySourceId,
        Tag::Source,
        Tag::Status,
        Tag::JournalTitleAbbreviation,
        Tag::Title,
        Tag::TransliteratedTitle,
        Tag::Volume,
    ];

    /// Match a tag code (e.g. `"TI"`) with a known [Tag].
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = match tag {
            "AB" => Tag::Abstract,
            "AD" => Tag::Affiliation,
            "AID" => Tag::ArticleIdentifier,
            "AU" => Tag::Author,
            "AUID" => Tag::AuthorIdentifier,
            "CI" => Tag::CopyrightInformation,
            "CIN" => Tag::CommentIn,
            "CN" => Tag::CorporateAuthor,
            "COIS" => Tag::ConflictOfInterest,
            "CON" => Tag::CommentOn,
            "CRDT" => Tag::CreateDate,
            "DCOM" => Tag::DateCompleted,
            "DEP" => Tag::ElectronicPublicationDate,
            "DP" => Tag::PublicationDate,
            "EDAT" => Tag::EntrezDate,
            "EIN" => Tag::ErratumIn,
            "FAU" => Tag::FullAuthorName,
            "GN" => Tag::GeneralNote,
            "GR" => Tag::GrantNumber,
            "GS" => Tag::GeneSymbol,
            "IP" => Tag::Issue,
            "IS" => Tag::Issn,
            "JID" => Tag::NlmUniqueId,
            "JT" => Tag::FullJournalTitle,
            "LA" => Tag::Language,
            "LID" => Tag::LocationId,
            "LR" => Tag::DateLastRevised,
            "MH" => Tag::MeshTerms,
            "MHDA" => Tag::MeshDate,
            "OT" => Tag::OtherTerm,
            "OTO" => Tag::OtherTermOwner,
            "OWN" => Tag::Owner,
            "PG" => Tag::Pagination,
            "PHST" => Tag::PublicationHistoryStatus,
            "PL" => Tag::PlaceOfPublication,
            "PMC" => Tag::PubmedCentralIdentifier,
            "PMCR" => Tag::PubmedCentralRelease,
            "PMID" => Tag::PubmedUniqueIdentifier,
            "PST" => Tag::PublicationStatus,
            "PT" => Tag::PublicationType,
            "RN" => Tag::RegistryNumber,
            "SB" => Tag::Subset,
            "SI" => Tag::SecondarySourceId,
            "SO" => Tag::Source,
            "STAT" => Tag::Status,
            "TA" => Tag::JournalTitleAbbreviation,
            "TI" => Tag::Title,
            "TT" => Tag::TransliteratedTitle,
            "VI" => Tag::Volume,
            _ => return None,
        };
        Some(tag)
    }

    /// The tag code as it appears in a MEDLINE file.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Tag::Abstract => "AB",
            Tag::Affiliation => "AD",
            Tag::ArticleIdentifier => "AID",
            Tag::Author => "AU",
            Tag::AuthorIdentifier => "AUID",
            Tag::CopyrightInformation => "CI",
            Tag::CommentIn => "CIN",
            Tag::CorporateAuthor => "CN",
            Tag::ConflictOfInterest => "COIS",
            Tag::CommentOn => "CON",
            Tag::CreateDate => "CRDT",
            Tag::DateCompleted => "DCOM",
            Tag::ElectronicPublicationDate => "DEP",
            Tag::PublicationDate => "DP",
            Tag::EntrezDate => "EDAT",
            Tag::ErratumIn => "EIN",
            Tag::FullAuthorName => "FAU",
            Tag::GeneralNote => "GN",
            Tag::GrantNumber => "GR",
            Tag::GeneSymbol => "GS",
            Tag::Issue => "IP",
            Tag::Issn => "IS",
            Tag::NlmUniqueId => "JID",
            Tag::FullJournalTitle => "JT",
            Tag::Language => "LA",
            Tag::LocationId => "LID",
            Tag::DateLastRevised => "LR",
            Tag::MeshTerms => "MH",
            Tag::MeshDate => "MHDA",
            Tag::OtherTerm => "OT",
            Tag::OtherTermOwner => "OTO",
            Tag::Owner => "OWN",
            Tag::Pagination => "PG",
            Tag::PublicationHistoryStatus => "PHST",
            Tag::PlaceOfPublication => "PL",
            Tag::PubmedCentralIdentifier => "PMC",
            Tag::PubmedCentralRelease => "PMCR",
            Tag::PubmedUniqueIdentifier => "PMID",
            Tag::PublicationStatus => "PST",
            Tag::PublicationType => "PT",
            Tag::RegistryNumber => "RN",
            Tag::Subset => "SB",
            Tag::SecondarySourceId => "SI",
            Tag::Source => "SO",
            Tag::Status => "STAT",
            Tag::JournalTitleAbbreviation => "TA",
            Tag::Title => "TI",
            Tag::TransliteratedTitle => "TT",
            Tag::Volume => "VI",
        }
    }

    /// Whether the tag may legitimately repeat within one record.
    ///
    /// Values of multi-valued tags are kept as an ordered list; repeated
    /// single-valued tags are joined into one string.
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            Tag::Affiliation
                | Tag::ArticleIdentifier
                | Tag::Author
                | Tag::AuthorIdentifier
                | Tag::CommentIn
                | Tag::CorporateAuthor
                | Tag::CommentOn
                | Tag::ErratumIn
                | Tag::FullAuthorName
                | Tag::GeneralNote
                | Tag::GrantNumber
                | Tag::GeneSymbol
                | Tag::Issn
                | Tag::Language
                | Tag::LocationId
                | Tag::MeshTerms
                | Tag::OtherTerm
                | Tag::PublicationHistoryStatus
                | Tag::PublicationType
                | Tag::RegistryNumber
                | Tag::Subset
                | Tag::SecondarySourceId
        )
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}
