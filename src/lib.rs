pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AddRepositoriesUseCase, ClearRegistryUseCase, LatestReleasesUseCase, ListRepositoriesUseCase,
    RegistryStore, ReleaseProvider, RemoveRepositoriesUseCase, RepositoryValidator,
};

pub use connector::{
    BotCommand, CommandOutput, Container, ContainerConfig, GithubClient, HttpDocumentStore,
    InMemoryRegistryStore, MockReleaseProvider, MockRepositoryValidator, Router, DEFAULT_API_URL,
};

pub use domain::{
    extract_identifiers, CandidateBatch, DomainError, FailureReason, ItemOutcome, OperationKind,
    OperationReport, OutcomeKind, OutcomeStatus, Registry, RegistryDocument, RegistrySnapshot,
    ReleasePage, ReleaseSummary, RepoId, VersionToken, MAX_BATCH_SIZE,
};
