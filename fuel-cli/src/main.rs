use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use reqwest::Method;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "fuel-cli")]
#[command(about = "⛽ Cliente de línea de comandos para la API de Fuel Tracker", long_about = None)]
struct Cli {
    /// URL base de la API
    #[arg(long, global = true, env = "FUEL_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Listar vehículos
    ListVehicles,

    /// Obtener un vehículo
    GetVehicle {
        #[arg(long)]
        vehicle_id: i64,
    },

    /// Crear un vehículo
    CreateVehicle {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: i32,
    },

    /// Reemplazar marca, modelo y año de un vehículo
    UpdateVehicle {
        #[arg(long)]
        vehicle_id: i64,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: i32,
    },

    /// Eliminar un vehículo y sus cargas
    DeleteVehicle {
        #[arg(long)]
        vehicle_id: i64,
    },

    /// Registrar una carga de combustible
    AddFuel {
        #[arg(long)]
        vehicle_id: i64,
        #[arg(long)]
        liters: f64,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        odometer: i64,
        /// Fecha RFC 3339; si falta la asigna el servidor
        #[arg(long)]
        timestamp: Option<String>,
    },

    /// Estadísticas de consumo de un vehículo
    FuelStats {
        #[arg(long)]
        vehicle_id: i64,
    },

    /// Cargas de un vehículo ordenadas por fecha
    VehicleFuels {
        #[arg(long)]
        vehicle_id: i64,
    },

    /// Listar todas las cargas
    ListFuelEntries,

    /// Obtener una carga
    GetFuelEntry {
        #[arg(long)]
        id: i64,
    },

    /// Corregir litros, precio y odómetro de una carga
    UpdateFuelEntry {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        liters: f64,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        odometer: i64,
    },

    /// Eliminar una carga
    DeleteFuelEntry {
        #[arg(long)]
        id: i64,
    },
}

/// Método, ruta y cuerpo JSON de cada comando
fn route(command: &Command) -> (Method, String, Option<Value>) {
    match command {
        Command::ListVehicles => (Method::GET, "/api/vehicles".to_string(), None),
        Command::GetVehicle { vehicle_id } => (Method::GET, format!("/api/vehicles/{}", vehicle_id), None),
        Command::CreateVehicle { brand, model, year } => (
            Method::POST,
            "/api/vehicles".to_string(),
            Some(json!({ "brand": brand, "model": model, "year": year })),
        ),
        Command::UpdateVehicle { vehicle_id, brand, model, year } => (
            Method::PUT,
            format!("/api/vehicles/{}", vehicle_id),
            Some(json!({ "brand": brand, "model": model, "year": year })),
        ),
        Command::DeleteVehicle { vehicle_id } => (Method::DELETE, format!("/api/vehicles/{}", vehicle_id), None),
        Command::AddFuel { vehicle_id, liters, price, odometer, timestamp } => {
            let mut body = json!({ "liters": liters, "price": price, "odometer": odometer });
            if let Some(timestamp) = timestamp {
                body["timestamp"] = json!(timestamp);
            }
            (Method::POST, format!("/api/vehicles/{}/fuel", vehicle_id), Some(body))
        }
        Command::FuelStats { vehicle_id } => (Method::GET, format!("/api/vehicles/{}/fuel/stats", vehicle_id), None),
        Command::VehicleFuels { vehicle_id } => (Method::GET, format!("/api/vehicles/{}/fuel", vehicle_id), None),
        Command::ListFuelEntries => (Method::GET, "/api/fuel-entries".to_string(), None),
        Command::GetFuelEntry { id } => (Method::GET, format!("/api/fuel-entries/{}", id), None),
        Command::UpdateFuelEntry { id, liters, price, odometer } => (
            Method::PUT,
            format!("/api/fuel-entries/{}", id),
            Some(json!({ "liters": liters, "price": price, "odometer": odometer })),
        ),
        Command::DeleteFuelEntry { id } => (Method::DELETE, format!("/api/fuel-entries/{}", id), None),
    }
}

async fn execute(client: &reqwest::Client, api_url: &str, command: &Command) -> Result<(u16, Value)> {
    let (method, path, body) = route(command);
    let url = format!("{}{}", api_url.trim_end_matches('/'), path);

    let mut request = client.request(method, &url);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("No se pudo conectar con {}", url))?;
    let status = response.status().as_u16();
    let text = response.text().await?;
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

    Ok((status, body))
}

fn print_response(status: u16, body: &Value) -> Result<()> {
    let success = body["success"].as_bool().unwrap_or(false);
    let header = format!("HTTP {}", status);
    if success {
        println!("{}", format!("✅ {}", header).bright_green().bold());
    } else {
        println!("{}", format!("❌ {}", header).bright_red().bold());
    }

    if let Some(message) = body["message"].as_str() {
        println!("{}", message.bright_yellow());
    }
    match &body["data"] {
        Value::Null => {}
        data => println!("{}", serde_json::to_string_pretty(data)?),
    }
    if !body.is_object() {
        println!("{}", body);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (status, body) = execute(&client, &cli.api_url, &cli.command).await?;
    print_response(status, &body)?;

    if !(200..300).contains(&status) {
        std::process::exit(1);
    }
    Ok(())
}
