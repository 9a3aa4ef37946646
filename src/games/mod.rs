pub mod trickster;
