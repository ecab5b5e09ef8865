use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "predql.pest"]
pub struct PredqlParser;
