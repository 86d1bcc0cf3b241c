#[cfg(feature = "llm")]
mod llm;
#[cfg(feature = "supabase")]
mod supabase;

#[cfg(feature = "llm")]
pub use llm::{LlmClient, LlmConnection, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
#[cfg(feature = "supabase")]
pub use supabase::{SupabaseClient, SupabaseConnection};
