use crate::report::{render_catalog, render_eligibility};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fuxing_benefits::eligibility::{ApplicantForm, BenefitCatalog, EligibilityReport};
use fuxing_benefits::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fuxing Elder Benefit Calculator",
    about = "Serve or query the Fuxing District elder welfare eligibility calculator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print which benefits an applicant qualifies for
    Check(CheckArgs),
    /// List every benefit with its eligibility criteria
    Benefits,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Applicant age in years
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: i64,
    /// Holds farmer insurance
    #[arg(long)]
    pub(crate) farmer: bool,
    /// Listed as a low or middle-low income household
    #[arg(long)]
    pub(crate) low_income: bool,
    /// Holds a disability certificate
    #[arg(long)]
    pub(crate) disability: bool,
    /// Owns the home they live in
    #[arg(long)]
    pub(crate) owner: bool,
    /// Rents the home they live in
    #[arg(long)]
    pub(crate) renter: bool,
    /// Looks after grandchildren
    #[arg(long)]
    pub(crate) grandparenting: bool,
}

impl CheckArgs {
    pub(crate) fn into_form(self) -> Result<ApplicantForm, AppError> {
        let mut form = ApplicantForm::new();
        form.set_age(self.age)?;
        form.set_statuses([
            self.farmer,
            self.low_income,
            self.disability,
            self.owner,
            self.renter,
            self.grandparenting,
        ]);
        Ok(form)
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Benefits => {
            print!("{}", render_catalog(&BenefitCatalog::standard()));
            Ok(())
        }
    }
}

fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let form = args.into_form()?;
    let report = EligibilityReport::build(&BenefitCatalog::standard(), form.snapshot());
    print!("{}", render_eligibility(&report));
    Ok(())
}
