pub mod supplementary;
