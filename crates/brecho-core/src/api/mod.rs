pub mod consignors;
pub mod intake;
pub mod items;
pub mod sales;

pub use consignors::*;
pub use intake::*;
pub use items::*;
pub use sales::*;
