use crate::config::cli::Command;
use crate::domain::model::{Company, ComputerModel};
use crate::domain::ports::ComputerDatabase;
use crate::utils::error::Result;

/// 執行單一子命令，回傳要輸出給使用者的文字
pub async fn run<D: ComputerDatabase + ?Sized>(db: &D, command: &Command) -> Result<String> {
    match command {
        Command::CreateCompany(args) => {
            let company = args.to_company();
            db.create_company(&company).await?;
            Ok(format!("Created {}", company))
        }
        Command::GetCompany { id } => {
            let company = db.get_company(id).await?;
            Ok(company.to_string())
        }
        Command::UpdateCompany(args) => {
            let company = args.to_company();
            db.update_company(&company).await?;
            Ok(format!("Updated {}", company))
        }
        Command::DeleteCompany { id } => {
            db.delete_company(id).await?;
            Ok(format!("Deleted company {}", id))
        }
        Command::CreateComputerModel {
            company_id,
            id,
            name,
            release,
        } => {
            // 只需識別碼；所屬公司由請求路徑表示
            let owner = Company::new(company_id.clone(), String::new(), String::new());
            let computer_model = ComputerModel::new(id.clone(), name.clone(), release.clone())
                .with_company(owner);
            db.create_computer_model(&computer_model).await?;
            Ok(format!(
                "Created computer model {} in company {}",
                computer_model.id, company_id
            ))
        }
        Command::GetComputerModel {
            company_id,
            model_id,
        } => {
            let computer_model = db.get_computer_model(company_id, model_id).await?;
            Ok(computer_model.to_string())
        }
        Command::DeleteComputerModel {
            company_id,
            model_id,
        } => {
            db.delete_computer_model(company_id, model_id).await?;
            Ok(format!(
                "Deleted computer model {} from company {}",
                model_id, company_id
            ))
        }
    }
}
