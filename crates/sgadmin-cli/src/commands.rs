//! Executing parsed commands against the server.

use serde::Serialize;
use serde_json::{Value, json};
use sgadmin_client::{
    AccessLogQuery, AccessTarget, AdminClient, CustomerChanges, NewCustomer, Outcome, Transport,
};
use sgadmin_protocol::SUCCESS_STATUS;

use crate::AppError;
use crate::cli::{
    AccessAction, AccessArgs, Command, CustomerAction, ListAction, LogAction, NewCustomerArgs,
    UpdateCustomerArgs,
};

/// Runs one command and converts its success value to JSON.
pub(crate) fn execute<T: Transport>(
    client: &AdminClient<T>,
    command: Command,
) -> Result<Outcome<Value>, AppError> {
    match command {
        Command::Customers { action } => customers(client, action),
        Command::Documents {
            action: ListAction::List,
        } => to_json(client.list_documents()?),
        Command::Publications {
            action: ListAction::List,
        } => to_json(client.list_publications()?),
        Command::Access { action } => access(client, action),
        Command::Logs {
            action:
                LogAction::List {
                    customers,
                    documents,
                    since,
                    until,
                },
        } => {
            let query = AccessLogQuery {
                customers,
                documents,
                since,
                until,
            };
            to_json(client.list_access_log(&query)?)
        }
    }
}

fn customers<T: Transport>(
    client: &AdminClient<T>,
    action: CustomerAction,
) -> Result<Outcome<Value>, AppError> {
    Ok(match action {
        CustomerAction::List { ids } => to_json(client.list_customers(&ids)?)?,
        CustomerAction::Add(args) => client
            .add_customer(&new_customer(args))?
            .map(|id| json!({ "id": id })),
        CustomerAction::Update(args) => {
            let (id, changes) = customer_changes(args);
            acknowledged(client.update_customer(&id, &changes)?)
        }
        CustomerAction::Delete { ids } => acknowledged(client.delete_customers(&ids)?),
        CustomerAction::Suspend { ids } => {
            acknowledged(client.set_customers_enabled(&ids, false)?)
        }
        CustomerAction::Activate { ids } => acknowledged(client.set_customers_enabled(&ids, true)?),
        CustomerAction::ResendLicence { id } => acknowledged(client.resend_licence(&id)?),
    })
}

fn access<T: Transport>(
    client: &AdminClient<T>,
    action: AccessAction,
) -> Result<Outcome<Value>, AppError> {
    let outcome = match action {
        AccessAction::Grant(AccessArgs {
            target,
            customers,
            ids,
        }) => client.grant_access(AccessTarget::from(target), &customers, &ids)?,
        AccessAction::Revoke(AccessArgs {
            target,
            customers,
            ids,
        }) => client.revoke_access(AccessTarget::from(target), &customers, &ids)?,
        AccessAction::Replace {
            target,
            customer,
            ids,
        } => client.replace_access(AccessTarget::from(target), &customer, &ids)?,
    };
    Ok(acknowledged(outcome))
}

fn new_customer(args: NewCustomerArgs) -> NewCustomer {
    NewCustomer {
        company: args.company,
        licenses: args.licenses,
        start_date: args.start_date,
        expiry_date: args.expiry_date,
        web_viewer: args.web_viewer,
        ..NewCustomer::new(args.name, args.email)
    }
}

fn customer_changes(args: UpdateCustomerArgs) -> (String, CustomerChanges) {
    let changes = CustomerChanges {
        name: args.name,
        email: args.email,
        company: args.company,
        licenses: args.licenses,
        start_date: args.start_date,
        expiry_date: args.expiry_date,
        web_viewer: args.web_viewer,
    };
    (args.id, changes)
}

fn acknowledged(outcome: Outcome<()>) -> Outcome<Value> {
    outcome.map(|()| json!({ "status": SUCCESS_STATUS }))
}

fn to_json<T: Serialize>(outcome: Outcome<T>) -> Result<Outcome<Value>, AppError> {
    match outcome {
        Outcome::Success(value) => serde_json::to_value(value)
            .map(Outcome::Success)
            .map_err(AppError::SerialiseOutput),
        Outcome::Failure(failure) => Ok(Outcome::Failure(failure)),
    }
}
