// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Infrastructure layer: ports and adapters for the external services
//! (embedding provider, content store, strategy source, LLM vendors).

pub mod embedding_client;
pub mod memory_store;
pub mod providers;
pub mod repository;
pub mod supabase_store;
pub mod supabase_strategy;

pub use embedding_client::{HashEmbeddings, OpenAiEmbeddings};
pub use memory_store::InMemoryContentStore;
pub use providers::{AnthropicChat, OpenAiChat};
pub use repository::{
    ContentStore, EmbeddingError, EmbeddingProvider, StoreError, StrategyError, StrategySource,
    SIMILARITY_THRESHOLD,
};
pub use supabase_store::SupabaseContentStore;
pub use supabase_strategy::SupabaseStrategyClient;
