use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{delete, get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info};
use serde::Deserialize;

use fakeword_core::GenError;
use fakeword_core::io::list_files;
use fakeword_core::model::generator::Generator;

mod config;

use config::{Args, Settings};

/// Query parameters of `/v1/words`.
#[derive(Deserialize)]
struct WordsQuery {
	count: Option<usize>,
	fake: Option<bool>,
}

/// Query parameters of `/v1/challenge`.
#[derive(Deserialize)]
struct ChallengeQuery {
	real: Option<usize>,
	fake: Option<usize>,
}

#[derive(Deserialize)]
struct LoadQuery {
	name: Option<String>,
}

struct SharedData {
	generator: Generator,
}

type SharedState = web::Data<Mutex<SharedData>>;

fn lock(data: &SharedState) -> Result<MutexGuard<'_, SharedData>, HttpResponse> {
	data.lock().map_err(|_| HttpResponse::InternalServerError().body("Generator lock failed"))
}

/// Maps a core error to an HTTP response.
fn error_response(e: &GenError) -> HttpResponse {
	match e {
		e if e.is_invalid_input() => HttpResponse::BadRequest().body(e.to_string()),
		GenError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
			HttpResponse::NotFound().body(e.to_string())
		}
		_ => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/word`
///
/// Returns one generated word as plain text, without real-word exclusion.
#[get("/v1/word")]
async fn get_word(data: SharedState) -> impl Responder {
	let mut shared_data = match lock(&data) {
		Ok(m) => m,
		Err(response) => return response,
	};
	HttpResponse::Ok().body(shared_data.generator.generate_word())
}

/// HTTP GET endpoint `/v1/fake_word`
///
/// Returns `{word, attempts, exhausted}`; `exhausted` is true when the retry
/// budget ran out and `word` may be a real word.
#[get("/v1/fake_word")]
async fn get_fake_word(data: SharedState) -> impl Responder {
	let mut shared_data = match lock(&data) {
		Ok(m) => m,
		Err(response) => return response,
	};
	HttpResponse::Ok().json(shared_data.generator.generate_fake_word_outcome())
}

#[get("/v1/words")]
async fn get_words(data: SharedState, settings: web::Data<Settings>, query: web::Query<WordsQuery>) -> impl Responder {
	let count = query.count.unwrap_or(10);
	if count > settings.max_batch {
		return HttpResponse::BadRequest().body(format!("count must be at most {}", settings.max_batch));
	}

	let mut shared_data = match lock(&data) {
		Ok(m) => m,
		Err(response) => return response,
	};
	let words = if query.fake.unwrap_or(true) {
		shared_data.generator.generate_fake_words(count)
	} else {
		shared_data.generator.generate_words(count)
	};
	HttpResponse::Ok().json(words)
}

/// HTTP GET endpoint `/v1/challenge`
///
/// Returns real words sampled from the loaded list next to fake ones.
#[get("/v1/challenge")]
async fn get_challenge(data: SharedState, settings: web::Data<Settings>, query: web::Query<ChallengeQuery>) -> impl Responder {
	let nb_real = query.real.unwrap_or(2);
	let nb_fake = query.fake.unwrap_or(1);
	if nb_real > settings.max_batch || nb_fake > settings.max_batch {
		return HttpResponse::BadRequest().body(format!("counts must be at most {}", settings.max_batch));
	}

	let mut shared_data = match lock(&data) {
		Ok(m) => m,
		Err(response) => return response,
	};
	HttpResponse::Ok().json(shared_data.generator.challenge(nb_real, nb_fake))
}

#[get("/v1/word_lists")]
async fn get_word_lists(settings: web::Data<Settings>) -> impl Responder {
	match list_files(&settings.data_dir, "txt") {
		Ok(files) => {
			let names: Vec<&str> = files.iter().filter_map(|f| f.strip_suffix(".txt")).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list word lists"),
	}
}

#[get("/v1/loaded")]
async fn get_loaded(data: SharedState) -> impl Responder {
	let shared_data = match lock(&data) {
		Ok(m) => m,
		Err(response) => return response,
	};
	HttpResponse::Ok().body(shared_data.generator.name().unwrap_or_default().to_owned())
}

/// HTTP PUT endpoint `/v1/load`
///
/// Builds a generator for `data_dir/<name>.txt` outside the lock, then swaps
/// it in, so requests never observe a half-loaded table.
#[put("/v1/load")]
async fn put_load(data: SharedState, settings: web::Data<Settings>, query: web::Query<LoadQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim().to_owned(),
		_ => return HttpResponse::BadRequest().body("Missing or empty word list name"),
	};
	let path = match settings.word_list_path(&name) {
		Some(path) => path,
		None => return HttpResponse::BadRequest().body("Invalid word list name"),
	};

	let config = settings.generator;
	let generator = match web::block(move || Generator::from_word_list(config, path)).await {
		Ok(Ok(generator)) => generator,
		Ok(Err(e)) => {
			error!("failed to load word list {}: {}", name, e);
			return error_response(&e);
		}
		Err(_) => return HttpResponse::InternalServerError().body("Loading task failed"),
	};

	let mut shared_data = match lock(&data) {
		Ok(m) => m,
		Err(response) => return response,
	};
	shared_data.generator = generator;
	info!("word list {} loaded", name);
	HttpResponse::Ok().body("Word list loaded successfully")
}

#[delete("/v1/reset")]
async fn delete_reset(data: SharedState) -> impl Responder {
	let mut shared_data = match lock(&data) {
		Ok(m) => m,
		Err(response) => return response,
	};
	shared_data.generator.reset();
	HttpResponse::Ok().body("Generator reset")
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_word)
		.service(get_fake_word)
		.service(get_words)
		.service(get_challenge)
		.service(get_word_lists)
		.service(get_loaded)
		.service(put_load)
		.service(delete_reset);
}

/// Main entry point for the server.
///
/// Optionally loads a word list, wraps the generator in a `Mutex` and starts
/// an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();
	let settings = args.settings();

	let generator = match &args.word_list {
		Some(name) => {
			let path = settings
				.word_list_path(name)
				.ok_or_else(|| std::io::Error::other(format!("invalid word list name {name:?}")))?;
			Generator::from_word_list(settings.generator, path).map_err(std::io::Error::other)?
		}
		None => Generator::with_config(settings.generator),
	};

	let shared_state = web::Data::new(Mutex::new(SharedData { generator }));
	let settings = web::Data::new(settings);

	info!("listening on {}:{}", args.host, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_state.clone())
			.app_data(settings.clone())
			.configure(configure)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
