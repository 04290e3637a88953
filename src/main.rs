mod args;
mod progress;

use crate::args::{AddressArgs, Args, Commands, StatusArgs, VerifyArgs};
use crate::progress::ApiProgress;

use clap::Parser;
use std::process::ExitCode;
use verifier::{
    api::{
        ApiClient, PollConfig, PollError, StatusCheck, SubmissionError, VerificationJob,
        VerificationRequest,
    },
    artifact::BuildArtifact,
    config::ApiKey,
    contract::{ContractAddress, ContractError},
    deployment::{read_deployed_address, DeploymentError},
    errors::{VerifyError, EXIT_FAILURE, EXIT_SUCCESS},
    verification::VerificationClient,
};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // clap uses 2 for usage errors, which is reserved for timeouts
            return if err.use_stderr() {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::from(EXIT_SUCCESS)
            };
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let result = match &args.command {
        Commands::Verify(args) => verify(args),
        Commands::Status(args) => status(args),
        Commands::Address(args) => address(args),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn api_key(raw: Option<&str>) -> Result<ApiKey, VerifyError> {
    Ok(ApiKey::new(raw.unwrap_or_default())?)
}

fn target_address(args: &VerifyArgs) -> Result<ContractAddress, VerifyError> {
    match (&args.target.address, &args.target.deployment) {
        (Some(address), _) => Ok(address.clone()),
        (None, Some(path)) => Ok(read_deployed_address(path)?),
        (None, None) => Err(ContractError::InvalidAddress(String::new()).into()),
    }
}

fn verify(args: &VerifyArgs) -> Result<(), VerifyError> {
    let api_key = api_key(args.api_key.as_deref())?;
    let artifact = BuildArtifact::load(&args.artifact)?;
    let address = target_address(args)?;

    let request = VerificationRequest::new(
        &artifact,
        address,
        args.contract_name.clone(),
        args.constructor_args(),
    )
    .map_err(SubmissionError::from)?;

    if args.dry_run {
        print_dry_run(&request, &api_key);
        return Ok(());
    }

    let client = VerificationClient::new(ApiClient::new(args.network_url.url.clone())?)
        .with_poll_config(PollConfig::new(args.max_attempts, args.interval_ms));

    println!(
        "Submitting {} at {} to {}",
        request.contract_name, request.address, args.network_url.url
    );
    let upload = ApiProgress::new_upload();
    let submitted = client.submit(&request, &api_key);
    upload.finish_and_clear();
    let job_id = submitted?;
    println!("Submission GUID: {job_id}");

    let polling = ApiProgress::new_polling();
    let max_attempts = client.poll_config().max_attempts;
    let outcome = client.poll_with(&job_id, &api_key, |job| {
        polling.set_message(&format!(
            "Pending ({}/{max_attempts}): {}",
            job.attempts_made(),
            job.last_message().unwrap_or("Unknown")
        ));
    });
    polling.finish_and_clear();

    let job = outcome?;
    println!("Verified: {}", job.last_message().unwrap_or("Unknown"));
    Ok(())
}

fn print_dry_run(request: &VerificationRequest, api_key: &ApiKey) {
    println!("Dry run, nothing was submitted. Form fields:");
    for (name, value) in request.form_fields(api_key) {
        match name {
            "apikey" => println!("  {name}: ***"),
            "sourceCode" => println!("  {name}: <{} bytes of standard-JSON input>", value.len()),
            _ => println!("  {name}: {value}"),
        }
    }
}

fn status(args: &StatusArgs) -> Result<(), VerifyError> {
    let api_key = api_key(args.api_key.as_deref())?;
    let client = VerificationClient::new(ApiClient::new(args.network_url.url.clone())?);

    let check = client.check_status(&args.guid, &api_key)?;
    println!("Job {}: {} ({})", args.guid, check.state(), check.message());

    match check {
        StatusCheck::Failed(_) => Err(PollError::VerificationFailed(
            VerificationJob::from_check(&args.guid, &check),
        )
        .into()),
        StatusCheck::Verified(_) | StatusCheck::Pending(_) => Ok(()),
    }
}

fn address(args: &AddressArgs) -> Result<(), VerifyError> {
    let path = args.artifact_path().ok_or(DeploymentError::NoArtifact)?;
    let address = read_deployed_address(&path)?;
    println!("{address}");
    Ok(())
}
