pub mod audio;
pub mod collision;
pub mod config;
pub mod context;
pub mod display;
pub mod effects;
pub mod entities;
pub mod error;
pub mod formation;
pub mod game;
pub mod highscores;
pub mod input;
pub mod render;
pub mod scoring;
pub mod settings;
pub mod sprites;
pub mod states;
pub mod storage;
pub mod timer;
