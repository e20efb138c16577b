//! Столы в рантайме: актор на стол + реестр столов.
//!
//! Каждый стол – отдельная tokio-задача с mpsc-инбоксом; реестр хранит
//! хэндлы по TableId. События раздачи рассылаются через broadcast.

pub mod actor;
pub mod messages;
pub mod registry;

pub use actor::{TableActor, TableHandle};
pub use messages::{ActionAck, TableEvent, TableMessage, TableSnapshot};
pub use registry::{RegistryError, TableMetadata, TableRegistry};
