use std::env;
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockpulse_metrics::distribution::{coverage_distribution, CoverageBand};
use stockpulse_metrics::employees::{team_summary, TeamSummary};
use stockpulse_metrics::rank::{rank_stores, RankDirection, StoreMetric};
use stockpulse_metrics::recommend::{
    restock_recommendations, transfer_suggestions, RestockRecommendation, TransferSuggestion,
};
use stockpulse_metrics::summary::summarize;
use stockpulse_metrics::trend::{sales_velocity, SalesVelocity};
use stockpulse_metrics::types::{DashboardSummary, EmployeePerformance, StoreSummary};
use stockpulse_pipeline::candidate_pipeline::{CandidatePipeline, ExecutionResult};
use stockpulse_pipeline::loader::{load_employees_file, load_stores_file};
use stockpulse_pipeline::pipelines::alert_digest::AlertDigestPipeline;
use stockpulse_pipeline::types::{AlertCandidate, DashboardQuery, Period, QueryRole};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportJson {
    generado_en: String,
    periodo: String,
    pipeline_ms: u128,
    resumen: DashboardSummary,
    alertas: Vec<AlertCandidate>,
    reabastecimientos: Vec<RestockRecommendation>,
    transferencias: Vec<TransferSuggestion>,
    top_tiendas: Vec<StoreSummary>,
    tiendas_rezagadas: Vec<StoreSummary>,
    distribucion_cobertura: Vec<CoverageBand>,
    velocidad_ventas: SalesVelocity,
    #[serde(skip_serializing_if = "Option::is_none")]
    equipo: Option<TeamJson>,
}

#[derive(Serialize)]
struct TeamJson {
    resumen: TeamSummary,
    empleados: Vec<EmployeePerformance>,
}

fn build_json(
    result: &ExecutionResult<DashboardQuery, AlertCandidate>,
    records: &[StoreSummary],
    employees: Option<&[EmployeePerformance]>,
    periodo: &str,
    top_n: usize,
    pipeline_ms: u128,
) -> ReportJson {
    ReportJson {
        generado_en: Utc::now().to_rfc3339(),
        periodo: periodo.to_string(),
        pipeline_ms,
        resumen: summarize(records, periodo),
        alertas: result.selected_candidates.clone(),
        reabastecimientos: restock_recommendations(records),
        transferencias: transfer_suggestions(records),
        top_tiendas: rank_stores(records, StoreMetric::Ventas, RankDirection::Top, top_n),
        tiendas_rezagadas: rank_stores(records, StoreMetric::Ventas, RankDirection::Bottom, top_n),
        distribucion_cobertura: coverage_distribution(records),
        velocidad_ventas: sales_velocity(records),
        equipo: employees.map(|emps| TeamJson {
            resumen: team_summary(emps),
            empleados: emps.to_vec(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_human(
    result: &ExecutionResult<DashboardQuery, AlertCandidate>,
    records: &[StoreSummary],
    employees: Option<&[EmployeePerformance]>,
    periodo: &str,
    top_n: usize,
    pipeline_ms: u128,
) {
    let resumen = summarize(records, periodo);

    println!();
    println!("  {:═<64}", "");
    println!("  STOCKPULSE — Reporte Ejecutivo de Inventario ({})", periodo);
    println!("  {:═<64}", "");
    println!();
    println!(
        "  {} tiendas · {} críticas · {} en alerta · {} óptimas",
        resumen.total_tiendas,
        resumen.tiendas_criticas,
        resumen.tiendas_alerta,
        resumen.tiendas_optimas
    );
    println!(
        "  Inventario total: {:.0} unidades · Ventas: {:.0} · Cobertura media: {:.1} días",
        resumen.inventario_total, resumen.ventas_totales, resumen.cobertura_promedio
    );
    println!();

    if result.selected_candidates.is_empty() {
        println!("  Sin alertas activas. Cobertura dentro de rango en toda la cadena.");
    } else {
        println!("  Alertas ({}):", result.selected_candidates.len());
        for (i, alert) in result.selected_candidates.iter().enumerate() {
            println!(
                "  {:>2}. [{}] {} — {}",
                i + 1,
                alert.severity,
                alert.titulo,
                alert.mensaje
            );
            if let Some(accion) = &alert.accion {
                println!("      Acción: {}", accion);
            }
        }
    }
    println!();

    let restocks = restock_recommendations(records);
    if !restocks.is_empty() {
        println!("  Reabastecimientos recomendados:");
        for r in &restocks {
            println!(
                "    {} — {} unidades ({:.0} días de cobertura, {})",
                r.tienda, r.cantidad_recomendada, r.cobertura, r.urgency
            );
        }
        println!();
    }

    let transfers = transfer_suggestions(records);
    if !transfers.is_empty() {
        println!("  Transferencias sugeridas:");
        for t in &transfers {
            println!(
                "    {} -> {} — {} unidades ({})",
                t.from_store, t.to_store, t.cantidad, t.priority
            );
        }
        println!();
    }

    let top = rank_stores(records, StoreMetric::Ventas, RankDirection::Top, top_n);
    println!("  Top {} tiendas por ventas:", top.len());
    for (i, store) in top.iter().enumerate() {
        println!(
            "    {}. {} — {:.0} ventas, {:.0} días de cobertura [{}]",
            i + 1,
            store.tienda,
            store.ventas,
            store.cobertura,
            store.status
        );
    }
    println!();

    println!("  Distribución de cobertura:");
    for band in coverage_distribution(records) {
        println!("    {:>10}: {} tiendas", band.nombre, band.count);
    }
    println!();

    if let Some(emps) = employees {
        let team = team_summary(emps);
        println!(
            "  Equipo: {} empleados · ventas {:.0} · comisiones {:.0}",
            team.total_empleados, team.ventas_totales, team.comisiones_totales
        );
        for emp in emps.iter().take(top_n) {
            println!(
                "    {}. {} ({}) — {:.0} en ventas",
                emp.ranking, emp.empleado, emp.tienda, emp.ventas_totales
            );
        }
        println!();
    }

    println!("  Generado en {}ms", pipeline_ms);
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn parse_period(raw: &str) -> Option<Period> {
    let (year, month) = raw.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(Period { year, month })
}

fn usage() -> ! {
    eprintln!("Usage: stockpulse-server <tiendas.csv> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --empleados FILE  Employee CSV to include the team block");
    eprintln!("  --tiendas t1,t2   Comma-separated store names to analyze");
    eprintln!("  --periodo YYYY-MM Reporting period (default: current month)");
    eprintln!("  --top N           Ranking and digest size (default: 10)");
    eprintln!("  --json            Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  stockpulse-server fixtures/tiendas.csv");
    eprintln!("  stockpulse-server fixtures/tiendas.csv --empleados fixtures/empleados.csv --json");
    process::exit(1);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let csv_path = &args[1];
    let mut employee_path: Option<String> = None;
    let mut store_filter: Vec<String> = Vec::new();
    let mut period: Option<Period> = None;
    let mut top_n: usize = 10;
    let mut json_output = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--empleados" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --empleados requires a file path");
                    process::exit(1);
                }
                employee_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--tiendas" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --tiendas requires a comma-separated list");
                    process::exit(1);
                }
                store_filter = args[i + 1]
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect();
                i += 2;
            }
            "--periodo" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --periodo requires a YYYY-MM value");
                    process::exit(1);
                }
                period = match parse_period(&args[i + 1]) {
                    Some(p) => Some(p),
                    None => {
                        eprintln!("Error: invalid period '{}', expected YYYY-MM", args[i + 1]);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--top" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --top requires a number");
                    process::exit(1);
                }
                top_n = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --top requires a positive integer");
                    process::exit(1);
                });
                i += 2;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    let records = match load_stores_file(csv_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading store CSV: {}", e);
            process::exit(1);
        }
    };
    if records.is_empty() {
        eprintln!("Error: no store records in '{}'", csv_path);
        process::exit(1);
    }

    let employees = match &employee_path {
        Some(path) => match load_employees_file(path) {
            Ok(e) => Some(e),
            Err(e) => {
                eprintln!("Error loading employee CSV: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    // Scope the report to the requested stores; the pipeline applies the
    // same filter to its candidates via the query.
    let scoped: Vec<StoreSummary> = if store_filter.is_empty() {
        records.clone()
    } else {
        records
            .iter()
            .filter(|r| store_filter.contains(&r.tienda))
            .cloned()
            .collect()
    };
    if scoped.is_empty() {
        eprintln!("Error: no matching stores found in the data");
        eprintln!("  Requested: {:?}", store_filter);
        process::exit(1);
    }

    info!(
        stores = scoped.len(),
        employees = employees.as_ref().map(|e| e.len()).unwrap_or(0),
        "data loaded"
    );

    let pipeline_start = Instant::now();
    let pipeline = AlertDigestPipeline::with_stores_and_size(scoped.clone(), top_n);
    let query = DashboardQuery {
        request_id: "report-001".into(),
        user_id: "exec_001".into(),
        role: QueryRole::Executive,
        tiendas: store_filter.clone(),
        period,
    };
    let result = pipeline.execute(query).await;
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    let periodo = result
        .query
        .period
        .map(|p| p.label())
        .unwrap_or_else(|| "actual".to_string());

    if json_output {
        let report = build_json(
            &result,
            &scoped,
            employees.as_deref(),
            &periodo,
            top_n,
            pipeline_ms,
        );
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        print_human(
            &result,
            &scoped,
            employees.as_deref(),
            &periodo,
            top_n,
            pipeline_ms,
        );
    }
}
