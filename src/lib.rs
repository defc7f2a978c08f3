pub mod changelog {
    pub mod category;
    pub mod render;
    pub mod report;
    pub mod warnings;
}
pub mod cli {
    pub mod parser;
}
pub mod config;
pub mod github {
    pub mod client;
    pub mod collect;
    pub mod issues;
    pub mod users;
}
pub mod output;
pub mod run;
