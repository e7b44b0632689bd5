pub mod open_food_facts_client;
