pub(crate) mod consignors;
pub(crate) mod intake;
pub(crate) mod items;
pub(crate) mod mobile;
pub(crate) mod sales;
pub(crate) mod system;
