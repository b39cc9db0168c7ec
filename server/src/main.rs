use std::error::Error;
use std::sync::Arc;

use futures::future::FutureExt;
use warp::Filter;

use log::{info, initialize_logger};
use reviews_backend::config::get_variable_or;
use reviews_backend::environment::Environment;
use reviews_backend::routes;
use reviews_backend::sentiment::SentimentScorer;
use reviews_backend::store::CsvStore;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let logger = initialize_logger();

    let main_port: u16 = get_variable_or("PORT", "8000")
        .parse()
        .expect("parse PORT as u16");
    let admin_port: u16 = get_variable_or("REVIEWS_ADMIN_PORT", "8001")
        .parse()
        .expect("parse REVIEWS_ADMIN_PORT as u16");
    let data_path = get_variable_or("REVIEWS_DATA_PATH", "data/reviews.csv");

    info!(logger, "Starting..."; "main_port" => main_port, "admin_port" => admin_port, "data_path" => &data_path);
    let logger = Arc::new(logger);

    // A load failure here is fatal: the service never starts without
    // its full data set in memory.
    let store = Arc::new(CsvStore::load(&data_path).expect("load reviews from REVIEWS_DATA_PATH"));
    let scorer = Arc::new(SentimentScorer::new());

    let environment = Environment::new(logger.clone(), store, scorer);

    let (termination_sender, mut termination_receiver) = mpsc::channel::<()>(1);

    let terminate: routes::admin::TerminationFunction = Arc::new(move || {
        let termination_sender = termination_sender.clone();

        async move {
            let termination_sender = termination_sender.clone();
            termination_sender.send(()).await.unwrap();
        }
        .boxed()
    });

    let should_terminate = async move {
        termination_receiver.recv().await;
    }
    .shared();

    let ctrlc = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let signal = tokio::signal::ctrl_c();

        async move {
            let terminate = terminate.clone();

            tokio::select! {
                _ = should_terminate => {},
                _ = signal => {
                    terminate().await;
                }
            }
        }
    };

    let main_server = {
        let should_terminate = should_terminate.clone();

        let logger2 = logger.clone();

        let list_route = routes::make_list_route(environment.clone());
        let create_route = routes::make_create_route(environment.clone());

        let routes = list_route
            .or(create_route)
            .recover(move |r| routes::format_rejection(logger2.clone(), r));

        let (_, main_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], main_port), async {
                should_terminate.await;
            });

        main_server
    };

    let admin_server = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let routes = routes::admin::make_healthz_route(environment.clone()).or(
            routes::admin::make_termination_route(environment.clone(), terminate),
        );

        let (_, admin_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], admin_port), async {
                should_terminate.await;
            });

        admin_server
    };

    tokio::join!(ctrlc, main_server, admin_server);

    info!(logger, "Exiting gracefully...");

    Ok(())
}
