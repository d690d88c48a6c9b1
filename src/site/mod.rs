pub mod index_patcher;
