pub mod store;
pub mod supabase;

pub use store::{ClinicStore, StoreError, SupabaseStore};
pub use supabase::SupabaseClient;
