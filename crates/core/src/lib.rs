pub mod catalog;
pub mod config;
pub mod game;
pub mod metrics;
pub mod sanitize;
pub mod session;
pub mod testing;

pub use catalog::{
    CatalogError, CatalogReferenceCache, Genre, GenreTable, MovieCatalog, MovieSummary, Review,
    TmdbClient, TmdbConfig,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig,
};
pub use game::{
    CandidateSelector, GameConfig, GameError, GameService, GenreMatch, GuessEvaluator,
    GuessFeedback, GuessOutcome, Puzzle, RoundStart, Verdict, YearDiff,
};
pub use sanitize::{
    GoogleTranslator, PassthroughTranslator, ReviewSanitizer, TitleRedactor, TranslateError,
    TranslationConfig, Translator,
};
pub use session::{
    GameIdentity, JwtSessionCodec, SessionCodec, SessionConfig, SessionError,
    DEFAULT_SESSION_SECRET,
};
