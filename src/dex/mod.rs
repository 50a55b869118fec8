pub mod raydium_clmm;
