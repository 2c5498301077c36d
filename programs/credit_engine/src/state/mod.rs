pub mod config;
pub mod credit;
pub mod distributor;
pub mod loan;
pub mod mutex;
pub mod oracle;
pub mod pool;
pub mod portfolio;
pub mod rating;

pub use config::*;
pub use credit::*;
pub use distributor::*;
pub use loan::*;
pub use mutex::*;
pub use oracle::*;
pub use pool::*;
pub use portfolio::*;
pub use rating::*;
