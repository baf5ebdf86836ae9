//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod campsite_repository;
pub mod repository_provider;
pub mod reservation_repository;

pub use campsite_repository::SeaOrmCampsiteRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
