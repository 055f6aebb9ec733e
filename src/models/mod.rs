mod category;
mod entry_type;
mod goal;
mod transaction;

pub(crate) use category::Category;
pub(crate) use entry_type::EntryType;
pub(crate) use goal::Goal;
pub(crate) use transaction::Transaction;
