mod helpers;

mod auth_test;
mod db_test;
mod lap_test;
mod ledger_test;
mod training_test;
